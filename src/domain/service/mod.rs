//! Service aggregate
//!
//! Contains the Service entity (a bookable offering) and repository interface.

pub mod model;
pub mod repository;

pub use model::Service;
pub use repository::{ServiceQuery, ServiceRepository};
