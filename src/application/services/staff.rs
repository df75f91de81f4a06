//! Staff roster service
//!
//! Directory management for staff members plus their recurring availability
//! rules, and the entry point for slot listing.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::application::scheduling::{parse_date, Slot, SlotGenerator};
use crate::domain::{
    AvailabilityRule, DomainError, DomainResult, Page, RepositoryProvider, StaffMember,
    StaffQuery, MINUTES_PER_DAY,
};

pub struct StaffService {
    repos: Arc<dyn RepositoryProvider>,
    slots: SlotGenerator,
}

impl StaffService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            slots: SlotGenerator::new(repos.clone()),
            repos,
        }
    }

    pub async fn create(&self, full_name: &str, is_active: bool) -> DomainResult<StaffMember> {
        let staff = self
            .repos
            .staff()
            .insert(StaffMember::new(full_name.trim(), is_active))
            .await?;
        info!("Staff member created: {} ({})", staff.full_name, staff.id);
        Ok(staff)
    }

    pub async fn list(&self, query: StaffQuery) -> DomainResult<Page<StaffMember>> {
        self.repos.staff().list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<StaffMember> {
        self.repos
            .staff()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Staff member", id))
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        is_active: Option<bool>,
    ) -> DomainResult<StaffMember> {
        let mut staff = self.get(id).await?;
        if let Some(full_name) = full_name {
            staff.full_name = full_name.trim().to_string();
        }
        if let Some(is_active) = is_active {
            staff.is_active = is_active;
        }
        staff.updated_at = Utc::now().naive_utc();
        self.repos.staff().update(staff).await
    }

    /// Add a weekly availability window.
    ///
    /// An exact (day, start, end) repeat returns the existing rule instead
    /// of creating a duplicate row.
    pub async fn add_availability_rule(
        &self,
        staff_id: Uuid,
        day_of_week: i32,
        start_min: i32,
        end_min: i32,
    ) -> DomainResult<AvailabilityRule> {
        self.get(staff_id).await?;

        if !(0..=6).contains(&day_of_week) {
            return Err(DomainError::invalid("day_of_week must be in 0..=6"));
        }
        if !(0..=MINUTES_PER_DAY).contains(&start_min)
            || !(0..=MINUTES_PER_DAY).contains(&end_min)
        {
            return Err(DomainError::invalid(
                "start_min and end_min must be in 0..=1440",
            ));
        }
        if end_min <= start_min {
            return Err(DomainError::invalid(
                "end_min must be greater than start_min",
            ));
        }

        if let Some(existing) = self
            .repos
            .availability_rules()
            .find_exact(staff_id, day_of_week, start_min, end_min)
            .await?
        {
            return Ok(existing);
        }

        let rule = self
            .repos
            .availability_rules()
            .insert(AvailabilityRule::new(
                staff_id,
                day_of_week,
                start_min,
                end_min,
            ))
            .await?;
        info!(
            "Availability rule added: staff={}, day={}, {}..{}",
            staff_id, day_of_week, start_min, end_min
        );
        Ok(rule)
    }

    /// All rules for the staff member, ordered by day then start
    pub async fn list_availability(&self, staff_id: Uuid) -> DomainResult<Vec<AvailabilityRule>> {
        self.get(staff_id).await?;
        self.repos.availability_rules().find_for_staff(staff_id).await
    }

    /// Delete a rule; NotFound when it belongs to another staff member
    pub async fn delete_availability_rule(
        &self,
        staff_id: Uuid,
        rule_id: Uuid,
    ) -> DomainResult<()> {
        self.get(staff_id).await?;

        let rule = self.repos.availability_rules().find_by_id(rule_id).await?;
        match rule {
            Some(rule) if rule.staff_id == staff_id => {
                self.repos.availability_rules().delete(rule_id).await?;
                info!("Availability rule deleted: {}", rule_id);
                Ok(())
            }
            _ => Err(DomainError::not_found("Availability rule", rule_id)),
        }
    }

    /// Enumerate bookable slots for a calendar date
    pub async fn list_slots(
        &self,
        staff_id: Uuid,
        date: &str,
        service_id: Uuid,
        step_min: i32,
    ) -> DomainResult<Vec<Slot>> {
        let date = parse_date(date)?;
        self.slots
            .generate_slots(staff_id, date, service_id, step_min)
            .await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryRepositories;

    async fn service_with_staff() -> (StaffService, Uuid) {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = StaffService::new(repos as Arc<dyn RepositoryProvider>);
        let staff = service.create("Alice Carter", true).await.unwrap();
        (service, staff.id)
    }

    #[tokio::test]
    async fn add_rule_rejects_inverted_window() {
        let (service, staff_id) = service_with_staff().await;
        let err = service
            .add_availability_rule(staff_id, 1, 600, 600)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn add_rule_rejects_out_of_range_bounds() {
        let (service, staff_id) = service_with_staff().await;
        assert!(service
            .add_availability_rule(staff_id, 7, 540, 600)
            .await
            .is_err());
        assert!(service
            .add_availability_rule(staff_id, 1, -5, 600)
            .await
            .is_err());
        assert!(service
            .add_availability_rule(staff_id, 1, 540, 1441)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn exact_duplicate_returns_existing_rule() {
        let (service, staff_id) = service_with_staff().await;
        let first = service
            .add_availability_rule(staff_id, 1, 540, 600)
            .await
            .unwrap();
        let second = service
            .add_availability_rule(staff_id, 1, 540, 600)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(service.list_availability(staff_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn overlapping_rules_are_accepted() {
        let (service, staff_id) = service_with_staff().await;
        service
            .add_availability_rule(staff_id, 1, 540, 600)
            .await
            .unwrap();
        service
            .add_availability_rule(staff_id, 1, 570, 630)
            .await
            .unwrap();
        assert_eq!(service.list_availability(staff_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_rejects_foreign_rule() {
        let (service, staff_id) = service_with_staff().await;
        let other = service.create("Bob Owens", true).await.unwrap();
        let rule = service
            .add_availability_rule(other.id, 1, 540, 600)
            .await
            .unwrap();

        let err = service
            .delete_availability_rule(staff_id, rule.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        service
            .delete_availability_rule(other.id, rule.id)
            .await
            .unwrap();
        assert!(service.list_availability(other.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_availability_is_ordered() {
        let (service, staff_id) = service_with_staff().await;
        service
            .add_availability_rule(staff_id, 3, 540, 600)
            .await
            .unwrap();
        service
            .add_availability_rule(staff_id, 1, 840, 900)
            .await
            .unwrap();
        service
            .add_availability_rule(staff_id, 1, 540, 600)
            .await
            .unwrap();

        let rules = service.list_availability(staff_id).await.unwrap();
        let order: Vec<(i32, i32)> =
            rules.iter().map(|r| (r.day_of_week, r.start_min)).collect();
        assert_eq!(order, vec![(1, 540), (1, 840), (3, 540)]);
    }
}
