use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AppRepository;

/// Tenant registry backed by the `apps` table.
pub struct PostgresAppRepository {
    pool: PgPool,
}

impl PostgresAppRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i32,
    name: String,
    secret: String,
    refresh_secret: String,
}

impl TryFrom<AppRow> for App {
    type Error = RepositoryError;

    fn try_from(row: AppRow) -> Result<Self, Self::Error> {
        let id = AppId::new(row.id)
            .map_err(|e| RepositoryError::InvalidRecord(format!("app id: {}", e)))?;

        Ok(App::new(id, row.name, row.secret, row.refresh_secret)?)
    }
}

#[async_trait]
impl AppRepository for PostgresAppRepository {
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, RepositoryError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret, refresh_secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(App::try_from).transpose()
    }
}
