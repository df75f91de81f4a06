//! Infrastructure layer: persistence implementations

pub mod database;
pub mod memory;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositories};
pub use memory::InMemoryRepositories;
