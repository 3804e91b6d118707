//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todos los valores tienen
//! un valor por defecto razonable para desarrollo; un valor presente pero
//! inválido es un error de arranque.

use std::env;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub seed_database: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            log_level: "debug".to_string(),
            seed_database: false,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let environment = lookup("ENVIRONMENT").unwrap_or(defaults.environment);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
            })?,
            None => defaults.port,
        };

        let seed_database = match lookup("SEED_DATABASE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                key: "SEED_DATABASE",
                value: raw.clone(),
            })?,
            None => false,
        };

        let default_level = if environment == "development" { "debug" } else { "info" };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| default_level.to_string()),
            seed_database,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Nivel de logging para tracing; un valor desconocido cae en INFO
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert!(!config.seed_database);
    }

    #[test]
    fn test_production_values() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("SEED_DATABASE", "true"),
        ]))
        .unwrap();

        assert!(!config.is_development());
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
        assert!(config.seed_database);
    }

    #[test]
    fn test_invalid_port() {
        let err = EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "abc")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "PORT",
                value: "abc".to_string()
            }
        );
    }
}
