//! Staff aggregate
//!
//! Contains the StaffMember entity and repository interface.

pub mod model;
pub mod repository;

pub use model::StaffMember;
pub use repository::{StaffQuery, StaffRepository};
