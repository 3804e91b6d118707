//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y extractores HTTP comunes.

pub mod errors;
pub mod extractors;
pub mod validation;

pub use errors::{AppError, AppResult};
pub use extractors::AppJson;
