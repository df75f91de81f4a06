//! Availability calendar
//!
//! Answers whether an interval lies fully inside a staff member's recurring
//! weekly availability for that weekday.

use std::sync::Arc;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::{minute_of_day, weekday_index};
use crate::domain::{DomainResult, RepositoryProvider};

pub struct AvailabilityCalendar {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityCalendar {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// True iff one rule for (staff, weekday of `start`) covers the whole
    /// interval. Coverage by a union of adjoining rules is intentionally
    /// rejected. Intervals spanning two calendar days are never available.
    pub async fn is_within_availability(
        &self,
        staff_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<bool> {
        if start.date() != end.date() {
            return Ok(false);
        }

        let start_min = minute_of_day(start);
        let end_min = minute_of_day(end);
        let rules = self
            .repos
            .availability_rules()
            .find_for_day(staff_id, weekday_index(start.date()))
            .await?;

        Ok(rules.iter().any(|rule| rule.covers(start_min, end_min)))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AvailabilityRule;
    use crate::infrastructure::InMemoryRepositories;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    async fn calendar_with_rule(staff_id: Uuid) -> AvailabilityCalendar {
        let repos = Arc::new(InMemoryRepositories::new());
        // Monday 09:00-17:00
        repos
            .availability_rules()
            .insert(AvailabilityRule::new(staff_id, 1, 540, 1020))
            .await
            .unwrap();
        AvailabilityCalendar::new(repos)
    }

    #[tokio::test]
    async fn interval_inside_rule_is_available() {
        let staff_id = Uuid::new_v4();
        let calendar = calendar_with_rule(staff_id).await;
        // 2026-03-02 is a Monday
        assert!(calendar
            .is_within_availability(staff_id, at(2, 9, 0), at(2, 10, 0))
            .await
            .unwrap());
        assert!(calendar
            .is_within_availability(staff_id, at(2, 9, 0), at(2, 17, 0))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn interval_outside_rule_is_rejected() {
        let staff_id = Uuid::new_v4();
        let calendar = calendar_with_rule(staff_id).await;
        assert!(!calendar
            .is_within_availability(staff_id, at(2, 8, 30), at(2, 9, 30))
            .await
            .unwrap());
        assert!(!calendar
            .is_within_availability(staff_id, at(2, 16, 30), at(2, 17, 30))
            .await
            .unwrap());
        // Tuesday has no rule
        assert!(!calendar
            .is_within_availability(staff_id, at(3, 9, 0), at(3, 10, 0))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn cross_day_interval_is_never_available() {
        let staff_id = Uuid::new_v4();
        let calendar = calendar_with_rule(staff_id).await;
        assert!(!calendar
            .is_within_availability(staff_id, at(2, 23, 0), at(3, 0, 30))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn union_of_adjoining_rules_does_not_cover() {
        let staff_id = Uuid::new_v4();
        let repos = Arc::new(InMemoryRepositories::new());
        repos
            .availability_rules()
            .insert(AvailabilityRule::new(staff_id, 1, 540, 600)) // 09:00-10:00
            .await
            .unwrap();
        repos
            .availability_rules()
            .insert(AvailabilityRule::new(staff_id, 1, 600, 660)) // 10:00-11:00
            .await
            .unwrap();
        let calendar = AvailabilityCalendar::new(repos);

        // 09:30-10:30 is covered only by the union of the two rules
        assert!(!calendar
            .is_within_availability(staff_id, at(2, 9, 30), at(2, 10, 30))
            .await
            .unwrap());
    }
}
