//! Domain errors

use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

/// Domain-level error types.
///
/// Every scheduling operation resolves to a value or one of these kinds.
/// Callers branch on the kind; there is no internal retry.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Time slot is already booked by appointment {appointment_id} ({start_at} to {end_at})"
    )]
    Conflict {
        appointment_id: Uuid,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
