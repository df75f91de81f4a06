//! SeaORM entity definitions

pub mod appointment;
pub mod availability_rule;
pub mod customer;
pub mod service;
pub mod staff_member;
