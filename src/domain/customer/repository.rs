//! Customer repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Customer;
use crate::domain::{DomainResult, Page};

/// Filters for listing customers
#[derive(Debug, Clone, Default)]
pub struct CustomerQuery {
    /// Case-insensitive substring match on name, phone or email
    pub q: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Save a new customer
    async fn insert(&self, customer: Customer) -> DomainResult<Customer>;

    /// Find customer by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Customer>>;

    /// List customers, newest first
    async fn list(&self, query: CustomerQuery) -> DomainResult<Page<Customer>>;
}
