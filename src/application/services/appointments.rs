//! Appointment lifecycle service
//!
//! Owns the BOOKED/CANCELLED state machine. Every mutation runs the full
//! validation chain (existence, active flags, midnight, availability,
//! conflict) before any write; a failing check aborts with zero mutation.
//! The storage layer re-checks overlap transactionally, so a race between
//! two concurrent bookings still resolves to exactly one BOOKED row.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};
use log::info;
use uuid::Uuid;

use crate::application::scheduling::{parse_instant, AvailabilityCalendar, ConflictDetector};
use crate::domain::{
    Appointment, AppointmentStatus, DomainError, DomainResult, Page, RepositoryProvider,
};

pub struct AppointmentService {
    repos: Arc<dyn RepositoryProvider>,
    calendar: AvailabilityCalendar,
    conflicts: ConflictDetector,
}

impl AppointmentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            calendar: AvailabilityCalendar::new(repos.clone()),
            conflicts: ConflictDetector::new(repos.clone()),
            repos,
        }
    }

    /// Book a new appointment.
    pub async fn create(
        &self,
        customer_id: Uuid,
        staff_id: Uuid,
        service_id: Uuid,
        start_at: &str,
        notes: Option<String>,
    ) -> DomainResult<Appointment> {
        let start = parse_instant(start_at)?;

        if self.repos.customers().find_by_id(customer_id).await?.is_none() {
            return Err(DomainError::not_found("Customer", customer_id));
        }
        let staff = self
            .repos
            .staff()
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Staff member", staff_id))?;
        let service = self
            .repos
            .services()
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service", service_id))?;

        if !staff.is_active {
            return Err(DomainError::invalid("Staff member is not active"));
        }
        if !service.is_active {
            return Err(DomainError::invalid("Service is not active"));
        }

        let end = start + Duration::minutes(service.duration_min as i64);
        self.check_interval(staff_id, start, end, None).await?;

        let notes = notes.map(|n| n.trim().to_string());
        let appointment = self
            .repos
            .appointments()
            .insert_booked(Appointment::new(
                customer_id,
                staff_id,
                service_id,
                start,
                end,
                notes,
            ))
            .await?;

        info!(
            "Appointment {} booked: staff={}, {} to {}",
            appointment.id, staff_id, appointment.start_at, appointment.end_at
        );

        Ok(appointment)
    }

    /// Cancel an appointment. Idempotent: cancelling an already cancelled
    /// appointment returns it unchanged without a write.
    pub async fn cancel(&self, id: Uuid, reason: Option<&str>) -> DomainResult<Appointment> {
        let mut appointment = self
            .repos
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Ok(appointment);
        }

        appointment.cancel(reason, Utc::now().naive_utc());
        let appointment = self.repos.appointments().update(appointment).await?;

        info!("Appointment {} cancelled", appointment.id);

        Ok(appointment)
    }

    /// Move an appointment to a new start time.
    ///
    /// The duration comes from the service linked at creation; the
    /// service's current active flag is not re-checked (preserved
    /// behavior). The conflict check excludes the appointment's own row.
    pub async fn reschedule(
        &self,
        id: Uuid,
        new_start: &str,
        notes: Option<String>,
    ) -> DomainResult<Appointment> {
        let mut appointment = self
            .repos
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(DomainError::invalid(
                "Cannot reschedule a cancelled appointment",
            ));
        }

        let start = parse_instant(new_start)?;
        let service = self
            .repos
            .services()
            .find_by_id(appointment.service_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service", appointment.service_id))?;
        let end = start + Duration::minutes(service.duration_min as i64);

        self.check_interval(appointment.staff_id, start, end, Some(appointment.id))
            .await?;

        appointment.move_to(start, end, notes.map(|n| n.trim().to_string()));
        let appointment = self.repos.appointments().update_schedule(appointment).await?;

        info!(
            "Appointment {} rescheduled to {} to {}",
            appointment.id, appointment.start_at, appointment.end_at
        );

        Ok(appointment)
    }

    /// BOOKED appointments for a staff member inside `[from, to]`.
    pub async fn list(
        &self,
        staff_id: Uuid,
        from: &str,
        to: &str,
        limit: u64,
        offset: u64,
    ) -> DomainResult<Page<Appointment>> {
        let from = parse_instant(from)?;
        let to = parse_instant(to)?;
        if to <= from {
            return Err(DomainError::invalid("'to' must be greater than 'from'"));
        }
        if self.repos.staff().find_by_id(staff_id).await?.is_none() {
            return Err(DomainError::not_found("Staff member", staff_id));
        }

        self.repos
            .appointments()
            .list_booked_in_range(staff_id, from, to, limit, offset)
            .await
    }

    /// Shared validation of a candidate interval: same-day, availability
    /// window, then overlap.
    async fn check_interval(
        &self,
        staff_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> DomainResult<()> {
        if start.date() != end.date() {
            return Err(DomainError::invalid("Appointment cannot cross midnight"));
        }

        if !self
            .calendar
            .is_within_availability(staff_id, start, end)
            .await?
        {
            return Err(DomainError::invalid(
                "Appointment is outside staff availability",
            ));
        }

        if let Some(existing) = self
            .conflicts
            .find_conflict(staff_id, start, end, exclude)
            .await?
        {
            return Err(DomainError::Conflict {
                appointment_id: existing.id,
                start_at: existing.start_at,
                end_at: existing.end_at,
            });
        }

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AvailabilityRule, Customer, Service, StaffMember};
    use crate::infrastructure::InMemoryRepositories;

    struct Fixture {
        repos: Arc<InMemoryRepositories>,
        service: AppointmentService,
        customer_id: Uuid,
        staff_id: Uuid,
        service_id: Uuid,
    }

    /// Staff with Monday 09:00-17:00 availability, a 30 minute service
    /// and one customer. 2026-03-02 is a Monday.
    async fn fixture() -> Fixture {
        fixture_with(30, 540, 1020).await
    }

    async fn fixture_with(duration_min: i32, start_min: i32, end_min: i32) -> Fixture {
        let repos = Arc::new(InMemoryRepositories::new());
        let customer = repos
            .customers()
            .insert(Customer::new("Dana Reeve", None, None))
            .await
            .unwrap();
        let staff = repos
            .staff()
            .insert(StaffMember::new("Alice Carter", true))
            .await
            .unwrap();
        let offering = repos
            .services()
            .insert(Service::new("Haircut", duration_min, None, true))
            .await
            .unwrap();
        repos
            .availability_rules()
            .insert(AvailabilityRule::new(staff.id, 1, start_min, end_min))
            .await
            .unwrap();
        let service = AppointmentService::new(repos.clone() as Arc<dyn RepositoryProvider>);
        Fixture {
            repos,
            service,
            customer_id: customer.id,
            staff_id: staff.id,
            service_id: offering.id,
        }
    }

    impl Fixture {
        async fn book(&self, start: &str) -> DomainResult<Appointment> {
            self.service
                .create(
                    self.customer_id,
                    self.staff_id,
                    self.service_id,
                    start,
                    None,
                )
                .await
        }
    }

    #[tokio::test]
    async fn create_books_inside_availability() {
        let f = fixture().await;
        let appointment = f.book("2026-03-02T09:00:00").await.unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Booked);
        assert_eq!(
            appointment.end_at,
            appointment.start_at + Duration::minutes(30)
        );
    }

    #[tokio::test]
    async fn create_rejects_unparsable_start() {
        let f = fixture().await;
        assert!(matches!(
            f.book("next tuesday").await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_unknown_references() {
        let f = fixture().await;
        let err = f
            .service
            .create(
                Uuid::new_v4(),
                f.staff_id,
                f.service_id,
                "2026-03-02T09:00:00",
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Customer", .. }));
    }

    #[tokio::test]
    async fn create_rejects_inactive_staff() {
        let f = fixture().await;
        let mut staff = f
            .repos
            .staff()
            .find_by_id(f.staff_id)
            .await
            .unwrap()
            .unwrap();
        staff.is_active = false;
        f.repos.staff().update(staff).await.unwrap();

        assert!(matches!(
            f.book("2026-03-02T09:00:00").await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_interval_escaping_the_window() {
        // Rule 09:00-11:00, service 90 minutes: 10:00 start ends 11:30
        let f = fixture_with(90, 540, 660).await;
        assert!(matches!(
            f.book("2026-03-02T10:00:00").await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn create_conflict_carries_the_blocking_appointment() {
        let f = fixture().await;
        let first = f.book("2026-03-02T09:00:00").await.unwrap();
        let err = f.book("2026-03-02T09:15:00").await.unwrap_err();
        match err {
            DomainError::Conflict {
                appointment_id,
                start_at,
                end_at,
            } => {
                assert_eq!(appointment_id, first.id);
                assert_eq!(start_at, first.start_at);
                assert_eq!(end_at, first.end_at);
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn back_to_back_bookings_succeed() {
        let f = fixture().await;
        f.book("2026-03-02T09:00:00").await.unwrap();
        f.book("2026-03-02T09:30:00").await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_creates_book_exactly_once() {
        let f = fixture().await;
        let (a, b) = tokio::join!(f.book("2026-03-02T09:00:00"), f.book("2026-03-02T09:00:00"));

        let oks = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(oks, 1);
        let err = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let f = fixture().await;
        let appointment = f.book("2026-03-02T09:00:00").await.unwrap();

        let cancelled = f
            .service
            .cancel(appointment.id, Some("customer sick"))
            .await
            .unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert!(cancelled.notes.as_deref().unwrap().contains("[CANCELLED]"));

        let again = f.service.cancel(appointment.id, Some("again")).await.unwrap();
        assert_eq!(again, cancelled);
    }

    #[tokio::test]
    async fn cancelled_interval_becomes_bookable_again() {
        let f = fixture().await;
        let appointment = f.book("2026-03-02T09:00:00").await.unwrap();
        f.service.cancel(appointment.id, None).await.unwrap();
        f.book("2026-03-02T09:00:00").await.unwrap();
    }

    #[tokio::test]
    async fn reschedule_to_own_interval_never_conflicts() {
        let f = fixture().await;
        let appointment = f.book("2026-03-02T09:00:00").await.unwrap();
        let moved = f
            .service
            .reschedule(appointment.id, "2026-03-02T09:00:00", None)
            .await
            .unwrap();
        assert_eq!(moved.start_at, appointment.start_at);
    }

    #[tokio::test]
    async fn reschedule_cancelled_appointment_fails() {
        let f = fixture().await;
        let appointment = f.book("2026-03-02T09:00:00").await.unwrap();
        f.service.cancel(appointment.id, None).await.unwrap();

        let err = f
            .service
            .reschedule(appointment.id, "2026-03-02T10:00:00", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn reschedule_into_other_booking_conflicts() {
        let f = fixture().await;
        let first = f.book("2026-03-02T09:00:00").await.unwrap();
        let second = f.book("2026-03-02T10:00:00").await.unwrap();

        let err = f
            .service
            .reschedule(second.id, "2026-03-02T09:15:00", None)
            .await
            .unwrap_err();
        match err {
            DomainError::Conflict { appointment_id, .. } => {
                assert_eq!(appointment_id, first.id)
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn reschedule_keeps_notes_unless_supplied() {
        let f = fixture().await;
        let appointment = f
            .service
            .create(
                f.customer_id,
                f.staff_id,
                f.service_id,
                "2026-03-02T09:00:00",
                Some("first visit".to_string()),
            )
            .await
            .unwrap();

        let moved = f
            .service
            .reschedule(appointment.id, "2026-03-02T10:00:00", None)
            .await
            .unwrap();
        assert_eq!(moved.notes.as_deref(), Some("first visit"));
    }

    #[tokio::test]
    async fn list_returns_booked_in_window_ordered() {
        let f = fixture().await;
        let late = f.book("2026-03-02T10:00:00").await.unwrap();
        let early = f.book("2026-03-02T09:00:00").await.unwrap();
        let cancelled = f.book("2026-03-02T11:00:00").await.unwrap();
        f.service.cancel(cancelled.id, None).await.unwrap();

        let page = f
            .service
            .list(
                f.staff_id,
                "2026-03-02T00:00:00",
                "2026-03-03T00:00:00",
                50,
                0,
            )
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(
            page.items.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![early.id, late.id]
        );
    }

    #[tokio::test]
    async fn list_rejects_inverted_window() {
        let f = fixture().await;
        let err = f
            .service
            .list(
                f.staff_id,
                "2026-03-03T00:00:00",
                "2026-03-02T00:00:00",
                50,
                0,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
