//! Customer domain entity

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

/// A customer who books appointments.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Customer {
    pub fn new(
        full_name: impl Into<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            phone,
            email,
            created_at: Utc::now().naive_utc(),
        }
    }
}
