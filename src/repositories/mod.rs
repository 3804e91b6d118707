//! Repositorios
//!
//! Capa de persistencia: CRUD por entidad sobre SQLite. Las funciones
//! reciben `&mut SqliteConnection`, que puede venir del pool o de una
//! transacción abierta por el servicio.

pub mod location_repository;
pub mod qr_code_repository;
pub mod route_repository;
pub mod schedule_repository;

pub use location_repository::LocationRepository;
pub use qr_code_repository::QrCodeRepository;
pub use route_repository::RouteRepository;
pub use schedule_repository::ScheduleRepository;
