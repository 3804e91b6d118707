//! Configuración de base de datos
//!
//! Este módulo maneja la configuración del pool SQLite con SQLx.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::environment::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://routes.db";

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    })
                }
            },
            None => defaults.max_connections,
        };

        Ok(Self {
            url: lookup("DATABASE_URL").unwrap_or(defaults.url),
            max_connections,
            acquire_timeout: defaults.acquire_timeout,
        })
    }

    /// Base de datos en memoria para testing.
    ///
    /// Cada conexión SQLite en memoria es una base distinta, así que el pool
    /// se limita a una conexión que nunca se recicla.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout);

        if self.is_in_memory() {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        pool_options.connect_with(options).await
    }
}
