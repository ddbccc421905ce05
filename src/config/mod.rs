use crate::core::{AppError, Result};
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::{DatabaseConfig, DatabaseTarget};
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Configuration(format!(
                "Invalid LOG_FORMAT '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

/// Read `key` and parse it, falling back to `default` when unset
pub(crate) fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::Pretty,
        };

        Ok(Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                log_format,
            },
            database: DatabaseConfig::from_lookup(&lookup)?,
            server: ServerConfig::from_lookup(&lookup)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.database.validate()?;

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
