use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::models::Location;
use crate::services::field_normalizer::{LocationPatch, NewLocation};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct LocationRepository;

impl LocationRepository {
    /// Inserta una parada. Si `id` viene, se respeta (recreación por id).
    pub async fn create(
        conn: &mut SqliteConnection,
        route_id: &str,
        id: Option<&str>,
        location: &NewLocation,
    ) -> AppResult<Location> {
        let now = Utc::now();
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let created = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (id, route_id, code, name, address, contact, notes, position, delivery_mode, lat, lng, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(&location.code)
        .bind(&location.name)
        .bind(&location.address)
        .bind(&location.contact)
        .bind(&location.notes)
        .bind(location.position)
        .bind(&location.delivery_mode)
        .bind(&location.lat)
        .bind(&location.lng)
        .bind(location.active)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to create location", e))?;

        Ok(created)
    }

    pub async fn find_by_id(conn: &mut SqliteConnection, id: &str) -> AppResult<Option<Location>> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to fetch location", e))
    }

    /// Paradas de una ruta ordenadas por posición
    pub async fn find_by_route(conn: &mut SqliteConnection, route_id: &str) -> AppResult<Vec<Location>> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE route_id = ? ORDER BY position ASC",
        )
        .bind(route_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to fetch locations", e))
    }

    pub async fn ids_by_route(conn: &mut SqliteConnection, route_id: &str) -> AppResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM locations WHERE route_id = ?")
            .bind(route_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to fetch locations", e))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Aplica solo los campos presentes en el patch
    pub async fn update(
        conn: &mut SqliteConnection,
        id: &str,
        patch: &LocationPatch,
    ) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET code = COALESCE(?, code),
                name = COALESCE(?, name),
                address = COALESCE(?, address),
                contact = COALESCE(?, contact),
                notes = COALESCE(?, notes),
                position = COALESCE(?, position),
                delivery_mode = COALESCE(?, delivery_mode),
                lat = COALESCE(?, lat),
                lng = COALESCE(?, lng),
                active = COALESCE(?, active),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&patch.code)
        .bind(&patch.name)
        .bind(&patch.address)
        .bind(&patch.contact)
        .bind(&patch.notes)
        .bind(patch.position)
        .bind(&patch.delivery_mode)
        .bind(&patch.lat)
        .bind(&patch.lng)
        .bind(patch.active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to update location", e))?
        .ok_or_else(|| not_found_error("Location", id))
    }

    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to delete location", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Location", id));
        }

        Ok(())
    }

    /// Borra varias paradas de una vez; devuelve cuántas se eliminaron
    pub async fn delete_many(conn: &mut SqliteConnection, ids: &[String]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM locations WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(")");

        let result = builder
            .build()
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to delete locations", e))?;

        Ok(result.rows_affected())
    }
}
