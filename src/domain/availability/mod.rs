//! Availability aggregate
//!
//! Contains the recurring weekly AvailabilityRule entity and repository
//! interface.

pub mod model;
pub mod repository;

pub use model::{AvailabilityRule, MINUTES_PER_DAY};
pub use repository::AvailabilityRuleRepository;
