use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::models::Route;
use crate::services::field_normalizer::{NewRoute, RoutePatch};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Acceso a la tabla `routes`.
///
/// Todas las funciones reciben una conexión para poder ejecutarse tanto con
/// el pool como dentro de una transacción.
pub struct RouteRepository;

impl RouteRepository {
    pub async fn create(conn: &mut SqliteConnection, route: &NewRoute) -> AppResult<Route> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, code, name, description, shift, delivery_mode, region, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&route.code)
        .bind(&route.name)
        .bind(&route.description)
        .bind(route.shift.as_str())
        .bind(&route.delivery_mode)
        .bind(&route.region)
        .bind(route.active)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to create route", e))?;

        Ok(created)
    }

    pub async fn find_by_id(conn: &mut SqliteConnection, id: &str) -> AppResult<Option<Route>> {
        sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to fetch route", e))
    }

    /// Rutas de una región, las más recientes primero
    pub async fn find_by_region(conn: &mut SqliteConnection, region: &str) -> AppResult<Vec<Route>> {
        sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE region = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(region)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to fetch routes", e))
    }

    pub async fn count_by_region(conn: &mut SqliteConnection, region: &str) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM routes WHERE region = ?")
            .bind(region)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to count routes", e))?;

        Ok(count)
    }

    /// Aplica solo los campos presentes en el patch; los ausentes se
    /// conservan con `COALESCE`.
    pub async fn update(conn: &mut SqliteConnection, id: &str, patch: &RoutePatch) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET code = COALESCE(?, code),
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                shift = COALESCE(?, shift),
                delivery_mode = COALESCE(?, delivery_mode),
                active = COALESCE(?, active),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&patch.code)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.shift.map(|s| s.as_str()))
        .bind(&patch.delivery_mode)
        .bind(patch.active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to update route", e))?
        .ok_or_else(|| not_found_error("Route", id))
    }

    /// Marca la ruta como modificada (p. ej. tras reconciliar sus paradas)
    pub async fn touch(conn: &mut SqliteConnection, id: &str) -> AppResult<()> {
        sqlx::query("UPDATE routes SET updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to update route", e))?;

        Ok(())
    }

    /// Borra la ruta; paradas, horarios y QR caen en cascada
    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to delete route", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Route", id));
        }

        Ok(())
    }
}
