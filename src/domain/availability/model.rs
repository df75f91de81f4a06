//! Availability rule domain entity

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

/// Minutes in a calendar day; rule bounds live in `[0, 1440]`.
pub const MINUTES_PER_DAY: i32 = 1440;

/// A recurring weekly window during which a staff member may be booked.
///
/// `day_of_week` uses 0 = Sunday .. 6 = Saturday in the single operating
/// timezone. `start_min`/`end_min` are minutes since midnight with
/// `end_min > start_min`; a rule never crosses midnight. Multiple rules per
/// staff member and day are allowed and may overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub day_of_week: i32,
    pub start_min: i32,
    pub end_min: i32,
    pub created_at: NaiveDateTime,
}

impl AvailabilityRule {
    pub fn new(staff_id: Uuid, day_of_week: i32, start_min: i32, end_min: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            staff_id,
            day_of_week,
            start_min,
            end_min,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// True when a single rule fully covers `[start_min, end_min]`.
    pub fn covers(&self, start_min: i32, end_min: i32) -> bool {
        self.start_min <= start_min && self.end_min >= end_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_requires_full_containment() {
        let rule = AvailabilityRule::new(Uuid::new_v4(), 1, 540, 600); // Mon 09:00-10:00
        assert!(rule.covers(540, 600));
        assert!(rule.covers(555, 585));
        assert!(!rule.covers(530, 600));
        assert!(!rule.covers(540, 601));
    }
}
