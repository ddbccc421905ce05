use crate::config::parse_var;
use crate::core::{AppError, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// `DATABASE_URL` value selecting the in-process store
pub const MEMORY_URL: &str = "memory://";

/// Where the application keeps its data
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Full `mysql://` URL from `DATABASE_URL`
    Url(String),
    /// Composed from the `DB_*` variables
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
    },
    /// In-process store, nothing persisted
    Memory,
}

// Keeps passwords out of logs
impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::Url(url) => match url.split_once('@') {
                Some((_, rest)) => write!(f, "mysql://***@{}", rest),
                None => write!(f, "{}", url),
            },
            DatabaseTarget::Parts {
                host, port, name, ..
            } => write!(f, "mysql://***@{}:{}/{}", host, port, name),
            DatabaseTarget::Memory => f.write_str(MEMORY_URL),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub target: DatabaseTarget,
    pub pool_size: u32,
    pub max_connections: u32,
    pub connect_retries: u32,
    pub retry_delay: Duration,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let target = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) if url.trim() == MEMORY_URL => DatabaseTarget::Memory,
            Some(url) => DatabaseTarget::Url(url.trim().to_string()),
            None => DatabaseTarget::Parts {
                host: lookup("DB_HOST").unwrap_or_else(|| "mysql".to_string()),
                port: parse_var(lookup, "DB_PORT", 3306)?,
                user: lookup("DB_USER").unwrap_or_else(|| "root".to_string()),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                name: lookup("DB_NAME").unwrap_or_else(|| "test".to_string()),
            },
        };

        Ok(DatabaseConfig {
            target,
            pool_size: parse_var(lookup, "DATABASE_POOL_SIZE", 5)?,
            max_connections: parse_var(lookup, "DATABASE_MAX_CONNECTIONS", 15)?,
            connect_retries: parse_var(lookup, "DATABASE_CONNECT_RETRIES", 5)?,
            retry_delay: Duration::from_secs(parse_var(lookup, "DATABASE_RETRY_DELAY_SECS", 5)?),
            run_migrations: parse_var(lookup, "RUN_MIGRATIONS", true)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 || self.max_connections == 0 {
            return Err(AppError::Configuration(
                "Database pool sizes must be greater than 0".to_string(),
            ));
        }

        if self.pool_size > self.max_connections {
            return Err(AppError::Configuration(format!(
                "DATABASE_POOL_SIZE ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                self.pool_size, self.max_connections
            )));
        }

        if self.connect_retries == 0 {
            return Err(AppError::Configuration(
                "DATABASE_CONNECT_RETRIES must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn is_memory(&self) -> bool {
        self.target == DatabaseTarget::Memory
    }

    /// MySQL connection options for the configured target
    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        match &self.target {
            DatabaseTarget::Url(url) => MySqlConnectOptions::from_str(url)
                .map_err(|e| AppError::Configuration(format!("Invalid DATABASE_URL: {}", e))),
            DatabaseTarget::Parts {
                host,
                port,
                user,
                password,
                name,
            } => Ok(MySqlConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(name)),
            DatabaseTarget::Memory => Err(AppError::Configuration(
                "In-memory store has no MySQL connection options".to_string(),
            )),
        }
    }

    /// Create a MySQL connection pool
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .max_lifetime(Duration::from_secs(3600))
            .test_before_acquire(true)
            .connect_with(self.connect_options()?)
            .await
            .map_err(|e| AppError::DatabaseUnavailable(e.to_string()))
    }

    /// Create the pool, retrying while the server is still starting up.
    /// Configuration errors are returned on the first attempt.
    pub async fn create_pool_with_retry(&self) -> Result<MySqlPool> {
        let mut attempt = 1;
        loop {
            match self.create_pool().await {
                Ok(pool) => return Ok(pool),
                Err(e @ AppError::DatabaseUnavailable(_)) if attempt < self.connect_retries => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.connect_retries,
                        "Database connection failed: {}. Retrying in {:?}",
                        e,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "Giving up on database after {} attempts: {}",
                        attempt,
                        e
                    );
                    return Err(e);
                }
            }
        }
    }
}
