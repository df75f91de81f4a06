//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_staff_members;
mod m20260101_000002_create_services;
mod m20260101_000003_create_customers;
mod m20260101_000004_create_availability_rules;
mod m20260101_000005_create_appointments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_staff_members::Migration),
            Box::new(m20260101_000002_create_services::Migration),
            Box::new(m20260101_000003_create_customers::Migration),
            Box::new(m20260101_000004_create_availability_rules::Migration),
            Box::new(m20260101_000005_create_appointments::Migration),
        ]
    }
}
