//! Service repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Service;
use crate::domain::{DomainResult, Page};

/// Filters for listing services
#[derive(Debug, Clone, Default)]
pub struct ServiceQuery {
    /// Case-insensitive substring match on name
    pub q: Option<String>,
    pub is_active: Option<bool>,
    pub limit: u64,
    pub offset: u64,
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Save a new service
    async fn insert(&self, service: Service) -> DomainResult<Service>;

    /// Find service by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Service>>;

    /// Update an existing service
    async fn update(&self, service: Service) -> DomainResult<Service>;

    /// List services, newest first
    async fn list(&self, query: ServiceQuery) -> DomainResult<Page<Service>>;
}
