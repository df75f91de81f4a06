//! Repository provider
//!
//! Bundles the per-aggregate repositories behind one trait so application
//! services receive a single explicitly passed storage dependency instead of
//! ambient global state.

use crate::domain::appointment::AppointmentRepository;
use crate::domain::availability::AvailabilityRuleRepository;
use crate::domain::customer::CustomerRepository;
use crate::domain::service::ServiceRepository;
use crate::domain::staff::StaffRepository;

/// One page of a listing plus the unpaged total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

/// Unified access to all repositories.
///
/// Implemented by [`SeaOrmRepositories`](crate::infrastructure::SeaOrmRepositories)
/// for production and [`InMemoryRepositories`](crate::infrastructure::InMemoryRepositories)
/// for tests and development.
pub trait RepositoryProvider: Send + Sync {
    fn staff(&self) -> &dyn StaffRepository;

    fn services(&self) -> &dyn ServiceRepository;

    fn customers(&self) -> &dyn CustomerRepository;

    fn availability_rules(&self) -> &dyn AvailabilityRuleRepository;

    fn appointments(&self) -> &dyn AppointmentRepository;
}
