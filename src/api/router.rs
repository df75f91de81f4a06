//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{
    appointments, customers, health, services, staff, AppState,
};
use crate::application::services::{
    AppointmentService, CatalogService, CustomerService, StaffService,
};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Staff
        staff::list_staff,
        staff::create_staff,
        staff::get_staff,
        staff::update_staff,
        staff::list_availability_rules,
        staff::add_availability_rule,
        staff::delete_availability_rule,
        staff::list_slots,
        // Services
        services::list_services,
        services::create_service,
        services::get_service,
        services::update_service,
        // Customers
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        // Appointments
        appointments::create_appointment,
        appointments::list_appointments,
        appointments::cancel_appointment,
        appointments::reschedule_appointment,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            PaginatedResponse<staff::StaffDto>,
            PaginatedResponse<services::ServiceDto>,
            PaginatedResponse<customers::CustomerDto>,
            PaginatedResponse<appointments::AppointmentDto>,
            // Staff
            staff::StaffDto,
            staff::AvailabilityRuleDto,
            staff::SlotDto,
            staff::CreateStaffRequest,
            staff::UpdateStaffRequest,
            staff::CreateAvailabilityRuleRequest,
            // Services
            services::ServiceDto,
            services::CreateServiceRequest,
            services::UpdateServiceRequest,
            // Customers
            customers::CustomerDto,
            customers::CreateCustomerRequest,
            // Appointments
            appointments::AppointmentDto,
            appointments::CreateAppointmentRequest,
            appointments::CancelAppointmentRequest,
            appointments::RescheduleAppointmentRequest,
        )
    ),
    tags(
        (name = "Health", description = "Проверка состояния сервера. Используйте для health-check мониторинга (uptime, ping, readiness)."),
        (name = "Staff", description = "Сотрудники, их еженедельные окна доступности и свободные слоты. Окна задаются в минутах от полуночи (540 = 09:00), день недели: 0 = воскресенье … 6 = суббота."),
        (name = "Services", description = "Каталог услуг. Длительность услуги определяет длину записи и слота. Цены хранятся в минимальных единицах валюты."),
        (name = "Customers", description = "Справочник клиентов. Email нормализуется в нижний регистр."),
        (name = "Appointments", description = "Записи на услуги. Статусы: `BOOKED` (активна), `CANCELLED` (отменена). Запись не может пересекать полночь, должна попадать в окно доступности сотрудника и не пересекаться с другими записями."),
    ),
    info(
        title = "Booking Service API",
        version = "1.0.0",
        description = "REST API сервиса записи на услуги.

## Формат ответов

Все REST-ответы обёрнуты в стандартную оболочку:
```json
{\"success\": true, \"data\": {...}}
```

При ошибке:
```json
{\"success\": false, \"data\": null, \"error\": \"описание ошибки\"}
```

## Коды ошибок

- `400` — некорректные данные запроса
- `404` — сущность не найдена
- `409` — интервал уже занят другой записью
- `500` — ошибка хранилища

## Пагинация

Эндпоинты со списками поддерживают параметры `limit` (по умолчанию 50) и `offset` (по умолчанию 0).",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(repos: Arc<dyn RepositoryProvider>, config: &AppConfig) -> Router {
    let state = AppState {
        staff: Arc::new(StaffService::new(repos.clone())),
        catalog: Arc::new(CatalogService::new(repos.clone())),
        customers: Arc::new(CustomerService::new(repos.clone())),
        appointments: Arc::new(AppointmentService::new(repos)),
        default_step_min: config.slots.default_step_min,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let staff_routes = Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route("/{id}", get(staff::get_staff).patch(staff::update_staff))
        .route(
            "/{id}/availability",
            get(staff::list_availability_rules).post(staff::add_availability_rule),
        )
        .route(
            "/{id}/availability/{rule_id}",
            delete(staff::delete_availability_rule),
        )
        .route("/{id}/slots", get(staff::list_slots));

    let service_routes = Router::new()
        .route(
            "/",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/{id}",
            get(services::get_service).patch(services::update_service),
        );

    let customer_routes = Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route("/{id}", get(customers::get_customer));

    let appointment_routes = Router::new()
        .route(
            "/",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/{id}/cancel", post(appointments::cancel_appointment))
        .route(
            "/{id}/reschedule",
            post(appointments::reschedule_appointment),
        );

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1/staff", staff_routes)
        .nest("/api/v1/services", service_routes)
        .nest("/api/v1/customers", customer_routes)
        .nest("/api/v1/appointments", appointment_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::domain::{AvailabilityRule, Service, StaffMember};
    use crate::infrastructure::InMemoryRepositories;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(router: &Router, uri: &str) -> axum::response::Response {
        router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Staff with a Monday 09:00-10:00 window and one 30 minute service.
    async fn seeded_router(config: &AppConfig) -> (Router, Uuid, Uuid) {
        let repos = Arc::new(InMemoryRepositories::new());
        let staff = repos
            .staff()
            .insert(StaffMember::new("Alice Carter", true))
            .await
            .unwrap();
        let service = repos
            .services()
            .insert(Service::new("Haircut", 30, None, true))
            .await
            .unwrap();
        repos
            .availability_rules()
            .insert(AvailabilityRule::new(staff.id, 1, 540, 600))
            .await
            .unwrap();

        (create_api_router(repos, config), staff.id, service.id)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let router = create_api_router(
            Arc::new(InMemoryRepositories::new()),
            &AppConfig::default(),
        );
        let response = get(&router, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn slots_request_falls_back_to_configured_step() {
        let mut config = AppConfig::default();
        config.slots.default_step_min = 30;
        let (router, staff_id, service_id) = seeded_router(&config).await;

        // 2026-03-02 is a Monday; step 30 yields 09:00 and 09:30 only
        let uri = format!(
            "/api/v1/staff/{}/slots?date=2026-03-02&service_id={}",
            staff_id, service_id
        );
        let response = get(&router, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);

        // An explicit step still wins over the configured default
        let response = get(&router, &format!("{}&step_min=15", uri)).await;
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_staff_is_a_404_error_envelope() {
        let router = create_api_router(
            Arc::new(InMemoryRepositories::new()),
            &AppConfig::default(),
        );
        let response = get(&router, &format!("/api/v1/staff/{}", Uuid::new_v4())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("not found"));
    }
}
