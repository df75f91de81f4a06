//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::appointment::AppointmentRepository;
use crate::domain::availability::AvailabilityRuleRepository;
use crate::domain::customer::CustomerRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::service::ServiceRepository;
use crate::domain::staff::StaffRepository;

use super::appointment_repository::SeaOrmAppointmentRepository;
use super::availability_rule_repository::SeaOrmAvailabilityRuleRepository;
use super::customer_repository::SeaOrmCustomerRepository;
use super::service_repository::SeaOrmServiceRepository;
use super::staff_repository::SeaOrmStaffRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositories::new(db.clone());
/// let staff = repos.staff().find_by_id(staff_id).await?;
/// let booked = repos.appointments().find_booked_on_day(staff_id, day).await?;
/// ```
pub struct SeaOrmRepositories {
    staff: SeaOrmStaffRepository,
    services: SeaOrmServiceRepository,
    customers: SeaOrmCustomerRepository,
    availability_rules: SeaOrmAvailabilityRuleRepository,
    appointments: SeaOrmAppointmentRepository,
}

impl SeaOrmRepositories {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            staff: SeaOrmStaffRepository::new(db.clone()),
            services: SeaOrmServiceRepository::new(db.clone()),
            customers: SeaOrmCustomerRepository::new(db.clone()),
            availability_rules: SeaOrmAvailabilityRuleRepository::new(db.clone()),
            appointments: SeaOrmAppointmentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositories {
    fn staff(&self) -> &dyn StaffRepository {
        &self.staff
    }

    fn services(&self) -> &dyn ServiceRepository {
        &self.services
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn availability_rules(&self) -> &dyn AvailabilityRuleRepository {
        &self.availability_rules
    }

    fn appointments(&self) -> &dyn AppointmentRepository {
        &self.appointments
    }
}
