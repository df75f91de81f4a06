//! SeaORM repository implementations

mod appointment_repository;
mod availability_rule_repository;
mod customer_repository;
mod repository_provider;
mod service_repository;
mod staff_repository;

pub use appointment_repository::SeaOrmAppointmentRepository;
pub use availability_rule_repository::SeaOrmAvailabilityRuleRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use repository_provider::SeaOrmRepositories;
pub use service_repository::SeaOrmServiceRepository;
pub use staff_repository::SeaOrmStaffRepository;

use crate::domain::DomainError;

/// Map a database error to the domain transport variant
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}
