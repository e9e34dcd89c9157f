use std::env;
use std::time::Duration;

use auth::TokenTtl;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Longest accepted token lifetime (ten years)
const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
    /// Upper bound on a single request, applied by the gRPC server
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__GRPC_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__ACCESS_TOKEN_TTL_SECS=900 overrides jwt.access_token_ttl_secs
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.access_token_ttl_secs <= 0 || self.jwt.refresh_token_ttl_secs <= 0 {
            return Err(ConfigError::Message(
                "jwt token lifetimes must be positive".to_string(),
            ));
        }
        if self.jwt.access_token_ttl_secs > MAX_TOKEN_TTL_SECS
            || self.jwt.refresh_token_ttl_secs > MAX_TOKEN_TTL_SECS
        {
            return Err(ConfigError::Message(format!(
                "jwt token lifetimes must not exceed {} seconds",
                MAX_TOKEN_TTL_SECS
            )));
        }
        if self.jwt.refresh_token_ttl_secs <= self.jwt.access_token_ttl_secs {
            return Err(ConfigError::Message(
                "jwt.refresh_token_ttl_secs must exceed jwt.access_token_ttl_secs".to_string(),
            ));
        }
        Ok(())
    }

    pub fn token_ttl(&self) -> TokenTtl {
        TokenTtl::new(
            chrono::Duration::seconds(self.jwt.access_token_ttl_secs),
            chrono::Duration::seconds(self.jwt.refresh_token_ttl_secs),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }
}
