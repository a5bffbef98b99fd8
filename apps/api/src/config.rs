//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use coffee_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// SQLite database file, or `:memory:`
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection (also the SQLite busy timeout)
    pub db_connect_timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            http_port: parse_var(&lookup, "HTTP_PORT", 8080)?,

            database_path: lookup("DATABASE_PATH")
                .filter(|path| !path.is_empty())
                .unwrap_or_else(|| "./coffee_shop.db".to_string())
                .into(),

            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 5)?,

            db_connect_timeout_secs: parse_var(&lookup, "DB_CONNECT_TIMEOUT_SECS", 30)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Pool configuration for [`coffee_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        if self.database_path.as_os_str() == coffee_db::pool::IN_MEMORY_PATH {
            return DbConfig::in_memory();
        }

        DbConfig::new(self.database_path.clone())
            .max_connections(self.db_max_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
