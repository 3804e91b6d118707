//! Sistema de manejo de errores
//!
//! Este módulo define los errores del sistema y su conversión a respuestas
//! HTTP. Todas las respuestas de error tienen la forma `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Error de persistencia: `message` es lo que ve el cliente, `source` solo va al log
    #[error("{message}: {source}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn database(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::Database {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensaje expuesto al cliente
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Database { message, .. } => message.clone(),
            AppError::Internal(_) => "An unexpected error occurred".to_string(),
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database { message, source } => {
                tracing::error!("❌ {}: {}", message, source);
            }
            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("⚠️ Bad request: {}", msg);
            }
            AppError::NotFound(msg) => {
                tracing::warn!("⚠️ Resource not found: {}", msg);
            }
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_hides_cause() {
        let err = AppError::database("Failed to update route", sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to update route");
        assert!(err.to_string().contains("no rows returned"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(bad_request_error("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(not_found_error("Route", "r1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            not_found_error("Route", "r1").public_message(),
            "Route with id 'r1' not found"
        );
        assert_eq!(
            AppError::Internal("boom".into()).public_message(),
            "An unexpected error occurred"
        );
    }
}
