//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema SQLite (ver `migrations/`).

pub mod delivery_mode;
pub mod delivery_schedule;
pub mod location;
pub mod qr_code;
pub mod route;

pub use delivery_mode::{DeliveryMode, Shift};
pub use delivery_schedule::DeliverySchedule;
pub use location::{Location, LocationWithChildren};
pub use qr_code::QrCodeImage;
pub use route::{Route, RouteWithLocations};
