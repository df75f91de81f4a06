//! # Booking Service
//!
//! Appointment scheduling service for a roster of staff members with
//! recurring weekly availability windows and fixed-duration services.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, statuses and repository traits
//! - **application**: Business logic: the scheduling primitives
//!   (availability calendar, conflict detection, slot generation) and the
//!   appointment lifecycle plus roster/catalog/customer services
//! - **infrastructure**: External concerns (SeaORM persistence, migrations,
//!   in-memory repositories for tests and development)
//! - **api**: REST API with Swagger documentation

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositories};

// Re-export API router
pub use api::create_api_router;
