use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::models::QrCodeImage;
use crate::services::field_normalizer::{NewQrCode, QrCodePatch};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct QrCodeRepository;

impl QrCodeRepository {
    pub async fn create(
        conn: &mut SqliteConnection,
        location_id: &str,
        qr_code: &NewQrCode,
    ) -> AppResult<QrCodeImage> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, QrCodeImage>(
            r#"
            INSERT INTO qr_code_images (id, location_id, image_url, destination_url, title, position, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(location_id)
        .bind(&qr_code.image_url)
        .bind(&qr_code.destination_url)
        .bind(&qr_code.title)
        .bind(qr_code.position)
        .bind(qr_code.active)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to create QR code", e))?;

        Ok(created)
    }

    pub async fn create_many(
        conn: &mut SqliteConnection,
        location_id: &str,
        qr_codes: &[NewQrCode],
    ) -> AppResult<()> {
        for qr_code in qr_codes {
            Self::create(conn, location_id, qr_code).await?;
        }
        Ok(())
    }

    pub async fn find_by_id(conn: &mut SqliteConnection, id: &str) -> AppResult<Option<QrCodeImage>> {
        sqlx::query_as::<_, QrCodeImage>("SELECT * FROM qr_code_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to fetch QR code", e))
    }

    pub async fn find_by_location(
        conn: &mut SqliteConnection,
        location_id: &str,
    ) -> AppResult<Vec<QrCodeImage>> {
        sqlx::query_as::<_, QrCodeImage>(
            "SELECT * FROM qr_code_images WHERE location_id = ? ORDER BY position ASC",
        )
        .bind(location_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to fetch QR codes", e))
    }

    /// Todos los QR de las paradas de una ruta, ordenados por posición
    pub async fn find_by_route(conn: &mut SqliteConnection, route_id: &str) -> AppResult<Vec<QrCodeImage>> {
        sqlx::query_as::<_, QrCodeImage>(
            r#"
            SELECT q.*
            FROM qr_code_images q
            JOIN locations l ON l.id = q.location_id
            WHERE l.route_id = ?
            ORDER BY q.position ASC
            "#,
        )
        .bind(route_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to fetch QR codes", e))
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        id: &str,
        patch: &QrCodePatch,
    ) -> AppResult<QrCodeImage> {
        sqlx::query_as::<_, QrCodeImage>(
            r#"
            UPDATE qr_code_images
            SET image_url = COALESCE(?, image_url),
                destination_url = COALESCE(?, destination_url),
                title = COALESCE(?, title),
                position = COALESCE(?, position),
                active = COALESCE(?, active),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&patch.image_url)
        .bind(&patch.destination_url)
        .bind(&patch.title)
        .bind(patch.position)
        .bind(patch.active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to update QR code", e))?
        .ok_or_else(|| not_found_error("QR code", id))
    }

    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM qr_code_images WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to delete QR code", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("QR code", id));
        }

        Ok(())
    }

    pub async fn delete_by_location(conn: &mut SqliteConnection, location_id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM qr_code_images WHERE location_id = ?")
            .bind(location_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database("Failed to delete QR codes", e))?;

        Ok(result.rows_affected())
    }
}
