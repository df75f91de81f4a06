//! API Handlers

pub mod appointments;
pub mod customers;
pub mod health;
pub mod services;
pub mod staff;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::application::services::{
    AppointmentService, CatalogService, CustomerService, StaffService,
};
use crate::domain::DomainError;

/// Shared state for all REST handlers
#[derive(Clone)]
pub struct AppState {
    pub staff: Arc<StaffService>,
    pub catalog: Arc<CatalogService>,
    pub customers: Arc<CustomerService>,
    pub appointments: Arc<AppointmentService>,
    /// Slot grid step applied when a slots request does not specify one
    pub default_step_min: i32,
}

/// HTTP status for a domain error
fn status_of(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error to the standard error envelope
pub(crate) fn reject(err: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    (status_of(&err), Json(ApiResponse::error(err.to_string())))
}

/// Map a request validation error to a 400 envelope
pub(crate) fn reject_invalid(
    err: validator::ValidationErrors,
) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(format!("Invalid request: {}", err))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn status_mapping_follows_error_taxonomy() {
        assert_eq!(
            status_of(&DomainError::not_found("Customer", uuid::Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(&DomainError::invalid("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(&DomainError::Storage("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
