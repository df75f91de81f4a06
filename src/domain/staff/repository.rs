//! Staff repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::StaffMember;
use crate::domain::{DomainResult, Page};

/// Filters for listing staff members
#[derive(Debug, Clone, Default)]
pub struct StaffQuery {
    /// Case-insensitive substring match on full name
    pub q: Option<String>,
    pub is_active: Option<bool>,
    pub limit: u64,
    pub offset: u64,
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Save a new staff member
    async fn insert(&self, staff: StaffMember) -> DomainResult<StaffMember>;

    /// Find staff member by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<StaffMember>>;

    /// Update an existing staff member
    async fn update(&self, staff: StaffMember) -> DomainResult<StaffMember>;

    /// List staff members, newest first
    async fn list(&self, query: StaffQuery) -> DomainResult<Page<StaffMember>>;
}
