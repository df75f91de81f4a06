pub mod appointment;
pub mod availability;
pub mod customer;
pub mod error;
pub mod repositories;
pub mod service;
pub mod staff;

// Re-export commonly used types
pub use appointment::{Appointment, AppointmentRepository, AppointmentStatus};
pub use availability::{AvailabilityRule, AvailabilityRuleRepository, MINUTES_PER_DAY};
pub use customer::{Customer, CustomerQuery, CustomerRepository};
pub use error::{DomainError, DomainResult};
pub use repositories::{Page, RepositoryProvider};
pub use service::{Service, ServiceQuery, ServiceRepository};
pub use staff::{StaffMember, StaffQuery, StaffRepository};
