use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::models::DeliverySchedule;
use crate::services::field_normalizer::NewSchedule;
use crate::utils::errors::{AppError, AppResult};

pub struct ScheduleRepository;

impl ScheduleRepository {
    pub async fn create_many(
        conn: &mut SqliteConnection,
        location_id: &str,
        schedules: &[NewSchedule],
    ) -> AppResult<()> {
        for schedule in schedules {
            sqlx::query(
                r#"
                INSERT INTO delivery_schedules (id, location_id, day, mode, start_date, end_date)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(location_id)
            .bind(&schedule.day)
            .bind(&schedule.mode)
            .bind(schedule.start_date)
            .bind(schedule.end_date)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to create delivery schedule", e))?;
        }

        Ok(())
    }

    pub async fn delete_by_location(conn: &mut SqliteConnection, location_id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM delivery_schedules WHERE location_id = ?")
            .bind(location_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to delete delivery schedules", e))?;

        Ok(result.rows_affected())
    }

    pub async fn find_by_location(
        conn: &mut SqliteConnection,
        location_id: &str,
    ) -> AppResult<Vec<DeliverySchedule>> {
        sqlx::query_as::<_, DeliverySchedule>(
            "SELECT * FROM delivery_schedules WHERE location_id = ? ORDER BY rowid",
        )
        .bind(location_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to fetch delivery schedules", e))
    }

    /// Todos los horarios de las paradas de una ruta
    pub async fn find_by_route(
        conn: &mut SqliteConnection,
        route_id: &str,
    ) -> AppResult<Vec<DeliverySchedule>> {
        sqlx::query_as::<_, DeliverySchedule>(
            r#"
            SELECT s.*
            FROM delivery_schedules s
            JOIN locations l ON l.id = s.location_id
            WHERE l.route_id = ?
            ORDER BY s.rowid
            "#,
        )
        .bind(route_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to fetch delivery schedules", e))
    }
}
