//! Bookable service domain entity

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

/// A fixed-duration service offered by the business (haircut, consultation).
///
/// `duration_min` drives the length of every appointment booked for this
/// service; prices are stored in minor currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub duration_min: i32,
    pub price_cents: Option<i64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        duration_min: i32,
        price_cents: Option<i64>,
        is_active: bool,
    ) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration_min,
            price_cents,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_service_keeps_duration() {
        let s = Service::new("Haircut", 30, Some(2500), true);
        assert_eq!(s.duration_min, 30);
        assert_eq!(s.price_cents, Some(2500));
        assert!(s.is_active);
    }
}
