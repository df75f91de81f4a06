//! Appointment repository interface

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::model::Appointment;
use crate::domain::{DomainResult, Page};

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find appointment by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Appointment>>;

    /// All BOOKED appointments starting on `day` for a staff member,
    /// ordered by (start_at, id) so results are deterministic for a fixed
    /// snapshot.
    async fn find_booked_on_day(
        &self,
        staff_id: Uuid,
        day: NaiveDate,
    ) -> DomainResult<Vec<Appointment>>;

    /// BOOKED appointments fully inside `[from, to]`, ordered by start_at
    async fn list_booked_in_range(
        &self,
        staff_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
        limit: u64,
        offset: u64,
    ) -> DomainResult<Page<Appointment>>;

    /// Persist a new BOOKED appointment.
    ///
    /// Re-runs the overlap check against other BOOKED rows inside the same
    /// storage transaction; an overlap found there surfaces as
    /// [`DomainError::Conflict`](crate::domain::DomainError::Conflict).
    /// This is the storage-level guard behind the application checks.
    async fn insert_booked(&self, appointment: Appointment) -> DomainResult<Appointment>;

    /// Persist a rescheduled interval for an existing appointment.
    ///
    /// Same transactional overlap guard as [`insert_booked`], excluding the
    /// appointment's own row from the comparison.
    ///
    /// [`insert_booked`]: AppointmentRepository::insert_booked
    async fn update_schedule(&self, appointment: Appointment) -> DomainResult<Appointment>;

    /// Update an existing appointment without interval checks (cancellation)
    async fn update(&self, appointment: Appointment) -> DomainResult<Appointment>;
}
