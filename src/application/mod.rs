//! Application layer - business logic and use cases

pub mod scheduling;
pub mod services;

pub use scheduling::{AvailabilityCalendar, ConflictDetector, Slot, SlotGenerator};
pub use services::{AppointmentService, CatalogService, CustomerService, StaffService};
