use std::env;
use std::fmt;

use auth::TokenIssuer;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as ConfigSource;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::identity::errors::CredentialError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// A missing or empty signing secret is an error; callers should treat
    /// it as fatal at startup.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigSource::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"));

        Self::from_builder(builder)
    }

    /// Build and validate configuration from an arbitrary set of sources.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Config = builder.build()?.try_deserialize()?;

        if config.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set to a non-empty value".to_string(),
            ));
        }

        Ok(config)
    }

    /// Build the token issuer from the configured signing secret.
    ///
    /// # Errors
    /// * `ConfigurationFault` - Signing secret is empty
    pub fn token_issuer(&self) -> Result<TokenIssuer, CredentialError> {
        TokenIssuer::new(self.jwt.secret.as_bytes())
            .map_err(|e| CredentialError::ConfigurationFault(e.to_string()))
    }

    /// Open the PostgreSQL connection pool.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(self.database.max_connections)
            .connect(&self.database.url)
            .await?;

        tracing::info!(
            max_connections = self.database.max_connections,
            database = "postgresql",
            "Database connection pool created"
        );

        Ok(pool)
    }
}
