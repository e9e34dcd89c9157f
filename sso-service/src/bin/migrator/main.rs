use sqlx::migrate::Migrate;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sso_service::config::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies pending schema migrations and exits.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    let pending = {
        // Released before running: the pool holds a single connection
        let mut conn = pg_pool.acquire().await?;
        conn.ensure_migrations_table().await?;
        let applied = conn.list_applied_migrations().await?;

        MIGRATOR
            .iter()
            .filter(|migration| {
                !applied
                    .iter()
                    .any(|applied| applied.version == migration.version)
            })
            .count()
    };

    if pending == 0 {
        tracing::info!("No migrations to apply");
        return Ok(());
    }

    MIGRATOR.run(&pg_pool).await?;
    tracing::info!(applied = pending, "Migrations applied successfully");

    Ok(())
}
