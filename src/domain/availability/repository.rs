//! Availability rule repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::AvailabilityRule;
use crate::domain::DomainResult;

#[async_trait]
pub trait AvailabilityRuleRepository: Send + Sync {
    /// Save a new rule
    async fn insert(&self, rule: AvailabilityRule) -> DomainResult<AvailabilityRule>;

    /// Find rule by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<AvailabilityRule>>;

    /// Find a rule with exactly this (day, start, end) for the staff member.
    /// Used to deduplicate repeated writes.
    async fn find_exact(
        &self,
        staff_id: Uuid,
        day_of_week: i32,
        start_min: i32,
        end_min: i32,
    ) -> DomainResult<Option<AvailabilityRule>>;

    /// All rules for a staff member, ordered by day_of_week then start_min
    async fn find_for_staff(&self, staff_id: Uuid) -> DomainResult<Vec<AvailabilityRule>>;

    /// Rules for one weekday, ordered by start_min ascending
    async fn find_for_day(
        &self,
        staff_id: Uuid,
        day_of_week: i32,
    ) -> DomainResult<Vec<AvailabilityRule>>;

    /// Delete a rule by ID
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
