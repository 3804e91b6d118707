//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, NaiveDate, Utc};
use validator::ValidationError;

/// Validar y convertir una fecha de horario de reparto.
///
/// Acepta RFC3339 (`2025-01-06T00:00:00Z`) o una fecha simple (`2025-01-06`),
/// que se interpreta como medianoche UTC.
pub fn parse_schedule_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339 or YYYY-MM-DD".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_schedule_date("2025-03-10T08:30:00+08:00").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_schedule_date("2025-03-10").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 3, 10));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_schedule_date("next monday").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("R1").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
