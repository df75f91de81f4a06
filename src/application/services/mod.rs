//! Application services
//!
//! Use-case level logic over the domain repositories. The appointment
//! lifecycle consults the scheduling primitives before every mutation; the
//! remaining services manage the roster, catalog and customer directory.

pub mod appointments;
pub mod catalog;
pub mod customers;
pub mod staff;

pub use appointments::AppointmentService;
pub use catalog::CatalogService;
pub use customers::CustomerService;
pub use staff::StaffService;
