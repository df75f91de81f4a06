//! Customer directory handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{ApiResponse, PaginatedResponse};
use crate::api::handlers::{reject, reject_invalid, AppState};
use crate::domain::{Customer, CustomerQuery};

/// Клиент
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDto {
    /// Уникальный ID клиента
    pub id: Uuid,
    /// Полное имя
    pub full_name: String,
    /// Телефон
    pub phone: Option<String>,
    /// Email (хранится в нижнем регистре)
    pub email: Option<String>,
    /// Дата создания
    pub created_at: NaiveDateTime,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            full_name: c.full_name,
            phone: c.phone,
            email: c.email,
            created_at: c.created_at,
        }
    }
}

/// Запрос на создание клиента
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCustomerRequest {
    /// Полное имя
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    /// Телефон
    pub phone: Option<String>,
    /// Email
    #[validate(email)]
    pub email: Option<String>,
}

/// Параметры фильтрации списка клиентов
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCustomersParams {
    /// Поиск по подстроке имени, телефона или email (без учёта регистра)
    pub q: Option<String>,
    /// Количество элементов. По умолчанию 50
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Смещение от начала списка. По умолчанию 0
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

/// Список клиентов
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    params(ListCustomersParams),
    responses(
        (status = 200, description = "Срез списка клиентов", body = ApiResponse<PaginatedResponse<CustomerDto>>)
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListCustomersParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<CustomerDto>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let query = CustomerQuery {
        q: params.q,
        limit: params.limit,
        offset: params.offset,
    };
    match state.customers.list(query).await {
        Ok(page) => Ok(Json(ApiResponse::success(PaginatedResponse::new(
            page.items.into_iter().map(Into::into).collect(),
            page.total,
            params.limit,
            params.offset,
        )))),
        Err(e) => Err(reject(e)),
    }
}

/// Создание клиента
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Клиент создан", body = ApiResponse<CustomerDto>),
        (status = 400, description = "Некорректные данные")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    req.validate().map_err(reject_invalid)?;
    match state
        .customers
        .create(&req.full_name, req.phone, req.email)
        .await
    {
        Ok(customer) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(customer.into())),
        )),
        Err(e) => Err(reject(e)),
    }
}

/// Получение клиента по ID
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = Uuid, Path, description = "ID клиента")),
    responses(
        (status = 200, description = "Данные клиента", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Клиент не найден")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.customers.get(id).await {
        Ok(customer) => Ok(Json(ApiResponse::success(customer.into()))),
        Err(e) => Err(reject(e)),
    }
}
