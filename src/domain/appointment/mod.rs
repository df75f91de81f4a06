//! Appointment aggregate
//!
//! Contains the Appointment entity, its status machine, and the repository
//! interface with the transactional double-booking guard.

pub mod model;
pub mod repository;

pub use model::{Appointment, AppointmentStatus};
pub use repository::AppointmentRepository;
