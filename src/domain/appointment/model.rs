//! Appointment domain entity

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    /// Active booking occupying its staff member's time
    Booked,
    /// Terminal state; the interval is released
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "BOOKED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "BOOKED" => Self::Booked,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked time interval for one staff member, customer and service.
///
/// The interval is half-open: `[start_at, end_at)`, so back-to-back
/// appointments never collide. `end_at` is always
/// `start_at + service.duration_min` and falls on the same calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub staff_id: Uuid,
    pub service_id: Uuid,
    pub status: AppointmentStatus,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub notes: Option<String>,
    pub cancelled_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Appointment {
    pub fn new(
        customer_id: Uuid,
        staff_id: Uuid,
        service_id: Uuid,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            staff_id,
            service_id,
            status: AppointmentStatus::Booked,
            start_at,
            end_at,
            notes,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_booked(&self) -> bool {
        self.status == AppointmentStatus::Booked
    }

    /// Half-open overlap with `[start, end)`: s1 < e2 and e1 > s2.
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_at < end && self.end_at > start
    }

    /// Cancel this appointment, stamping the cancellation time.
    ///
    /// When a reason is given it is appended to the notes as a tagged
    /// annotation; prior notes are kept.
    pub fn cancel(&mut self, reason: Option<&str>, at: NaiveDateTime) {
        self.status = AppointmentStatus::Cancelled;
        self.cancelled_at = Some(at);
        self.updated_at = at;
        if let Some(reason) = reason {
            let annotation = format!("[CANCELLED] {}", reason);
            self.notes = Some(match self.notes.take() {
                Some(existing) => format!("{}\n{}", existing, annotation),
                None => annotation,
            });
        }
    }

    /// Move this appointment to a new interval, optionally replacing notes.
    pub fn move_to(
        &mut self,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        notes: Option<String>,
    ) {
        self.start_at = start_at;
        self.end_at = end_at;
        if let Some(notes) = notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now().naive_utc();
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sample() -> Appointment {
        Appointment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            at(9, 0),
            at(9, 30),
            None,
        )
    }

    #[test]
    fn new_appointment_is_booked() {
        let a = sample();
        assert!(a.is_booked());
        assert!(a.cancelled_at.is_none());
    }

    #[test]
    fn back_to_back_intervals_do_not_overlap() {
        let a = sample(); // 09:00-09:30
        assert!(!a.overlaps(at(9, 30), at(10, 0)));
        assert!(!a.overlaps(at(8, 30), at(9, 0)));
    }

    #[test]
    fn one_minute_overlap_is_detected() {
        let mut a = sample();
        a.start_at = at(9, 0);
        a.end_at = at(9, 31);
        assert!(a.overlaps(at(9, 30), at(10, 0)));
    }

    #[test]
    fn cancel_preserves_prior_notes() {
        let mut a = sample();
        a.notes = Some("bring own shampoo".to_string());
        a.cancel(Some("customer sick"), at(12, 0));
        assert_eq!(a.status, AppointmentStatus::Cancelled);
        assert_eq!(a.cancelled_at, Some(at(12, 0)));
        assert_eq!(
            a.notes.as_deref(),
            Some("bring own shampoo\n[CANCELLED] customer sick")
        );
    }

    #[test]
    fn cancel_without_reason_keeps_notes_untouched() {
        let mut a = sample();
        a.notes = Some("first visit".to_string());
        a.cancel(None, at(12, 0));
        assert_eq!(a.notes.as_deref(), Some("first visit"));
    }

    #[test]
    fn move_to_keeps_notes_unless_replaced() {
        let mut a = sample();
        a.notes = Some("keep me".to_string());
        a.move_to(at(10, 0), at(10, 30), None);
        assert_eq!(a.notes.as_deref(), Some("keep me"));
        a.move_to(at(11, 0), at(11, 30), Some("new note".to_string()));
        assert_eq!(a.notes.as_deref(), Some("new note"));
        assert_eq!(a.start_at, at(11, 0));
    }

    #[test]
    fn status_roundtrip() {
        for status in &[AppointmentStatus::Booked, AppointmentStatus::Cancelled] {
            assert_eq!(&AppointmentStatus::from_str(status.as_str()), status);
        }
    }
}
