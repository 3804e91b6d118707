//! Conexión a SQLite
//!
//! Este módulo abre el pool de conexiones y aplica las migraciones
//! embebidas en `migrations/`.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::config::database::DatabaseConfig;

/// Conexión a la base de datos con migraciones aplicadas
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Abrir el pool con la configuración del entorno
    pub async fn new_default() -> Result<Self> {
        let config = DatabaseConfig::from_env()?;
        Self::new(&config).await
    }

    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("Error abriendo la base de datos {}", mask_database_url(&config.url)))?;

        run_migrations(&pool)
            .await
            .context("Error aplicando migraciones")?;

        tracing::info!("✅ Base de datos lista ({})", mask_database_url(&config.url));

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Enmascara credenciales y opciones de la URL antes de loguearla
fn mask_database_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);

    match (without_query.find("://"), without_query.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => format!(
            "{}***:***@{}",
            &without_query[..scheme_end + 3],
            &without_query[at_pos + 1..]
        ),
        _ => without_query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_database_url() {
        let masked = mask_database_url("sqlite://admin:secret@/var/lib/routes.db?mode=rwc");
        assert_eq!(masked, "sqlite://***:***@/var/lib/routes.db");

        assert_eq!(mask_database_url("sqlite://routes.db"), "sqlite://routes.db");
        assert_eq!(mask_database_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[tokio::test]
    async fn test_in_memory_database_has_schema() {
        let db = DatabaseConnection::new(&DatabaseConfig::in_memory())
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('routes', 'locations', 'delivery_schedules', 'qr_code_images')",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();

        assert_eq!(count, 4);
    }
}
