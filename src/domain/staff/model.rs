//! Staff member domain entity

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

/// A bookable member of the roster.
///
/// Inactive staff members stay in the directory (their appointment history
/// references them) but cannot receive new bookings.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffMember {
    pub id: Uuid,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl StaffMember {
    pub fn new(full_name: impl Into<String>, is_active: bool) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
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
    fn new_staff_member_gets_fresh_id() {
        let a = StaffMember::new("Alice Carter", true);
        let b = StaffMember::new("Alice Carter", true);
        assert_ne!(a.id, b.id);
        assert!(a.is_active);
        assert_eq!(a.full_name, "Alice Carter");
    }
}
