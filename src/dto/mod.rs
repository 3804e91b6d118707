//! DTOs de la API
//!
//! Formas de entrada y salida de los endpoints HTTP. Los payloads de entrada
//! aceptan los alias que envía el frontend; la traducción a registros
//! canónicos vive en `services::field_normalizer`.

pub mod qr_code_dto;
pub mod route_dto;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializa un texto opcional que puede llegar como string o como número
/// (p. ej. `"lat": 3.1073` o `"lat": "3.1073"`).
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
