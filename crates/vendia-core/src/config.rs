//! Configuration module
//!
//! Environment-driven configuration for the database-backed services.

use std::env;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Service configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; everything else has a parsed default.
    /// A `.env` file is honored when present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Ignore a missing .env file; only explicit env matters then.
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            database_url,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
