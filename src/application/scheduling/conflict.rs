//! Conflict detector
//!
//! Answers whether an interval overlaps an existing BOOKED appointment for a
//! staff member, optionally excluding one appointment (used by reschedule so
//! an appointment never conflicts with itself).

use std::sync::Arc;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::{Appointment, DomainResult, RepositoryProvider};

pub struct ConflictDetector {
    repos: Arc<dyn RepositoryProvider>,
}

impl ConflictDetector {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// First BOOKED appointment overlapping `[start, end)`, by start time.
    ///
    /// Candidates are confined to the calendar day of `start`; appointments
    /// never cross midnight, so nothing outside that day can overlap.
    pub async fn find_conflict(
        &self,
        staff_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> DomainResult<Option<Appointment>> {
        let booked = self
            .repos
            .appointments()
            .find_booked_on_day(staff_id, start.date())
            .await?;

        Ok(booked
            .into_iter()
            .filter(|a| exclude != Some(a.id))
            .find(|a| a.overlaps(start, end)))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryRepositories;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    async fn detector_with_booking(
        staff_id: Uuid,
    ) -> (ConflictDetector, Appointment) {
        let repos = Arc::new(InMemoryRepositories::new());
        let appointment = repos
            .appointments()
            .insert_booked(Appointment::new(
                Uuid::new_v4(),
                staff_id,
                Uuid::new_v4(),
                at(9, 0),
                at(9, 30),
                None,
            ))
            .await
            .unwrap();
        (ConflictDetector::new(repos), appointment)
    }

    #[tokio::test]
    async fn back_to_back_is_not_a_conflict() {
        let staff_id = Uuid::new_v4();
        let (detector, _) = detector_with_booking(staff_id).await;
        let found = detector
            .find_conflict(staff_id, at(9, 30), at(10, 0), None)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn one_minute_overlap_is_a_conflict() {
        let staff_id = Uuid::new_v4();
        let (detector, existing) = detector_with_booking(staff_id).await;
        let found = detector
            .find_conflict(staff_id, at(9, 29), at(9, 59), None)
            .await
            .unwrap();
        assert_eq!(found.map(|a| a.id), Some(existing.id));
    }

    #[tokio::test]
    async fn excluded_appointment_never_conflicts_with_itself() {
        let staff_id = Uuid::new_v4();
        let (detector, existing) = detector_with_booking(staff_id).await;
        let found = detector
            .find_conflict(staff_id, at(9, 0), at(9, 30), Some(existing.id))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn other_staff_bookings_are_ignored() {
        let staff_id = Uuid::new_v4();
        let (detector, _) = detector_with_booking(staff_id).await;
        let found = detector
            .find_conflict(Uuid::new_v4(), at(9, 0), at(9, 30), None)
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
