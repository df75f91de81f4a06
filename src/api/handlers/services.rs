//! Service catalog handlers

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
use crate::domain::{Service, ServiceQuery};

/// Услуга
///
/// Определяет длительность записи; цена хранится в минимальных
/// единицах валюты (копейки, центы).
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceDto {
    /// Уникальный ID услуги
    pub id: Uuid,
    /// Название услуги
    pub name: String,
    /// Длительность в минутах
    pub duration_min: i32,
    /// Цена в минимальных единицах валюты
    pub price_cents: Option<i64>,
    /// Доступна ли услуга для записи
    pub is_active: bool,
    /// Дата создания
    pub created_at: NaiveDateTime,
    /// Дата последнего обновления
    pub updated_at: NaiveDateTime,
}

impl From<Service> for ServiceDto {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            name: s.name,
            duration_min: s.duration_min,
            price_cents: s.price_cents,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Запрос на создание услуги
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateServiceRequest {
    /// Название услуги
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Длительность в минутах (минимум 1)
    #[validate(range(min = 1))]
    pub duration_min: i32,
    /// Цена в минимальных единицах валюты
    pub price_cents: Option<i64>,
    /// Доступна ли для записи (по умолчанию true)
    pub is_active: Option<bool>,
}

/// Запрос на обновление услуги
///
/// Partial update — передайте только изменяемые поля.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateServiceRequest {
    /// Новое название
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// Новая длительность в минутах
    #[validate(range(min = 1))]
    pub duration_min: Option<i32>,
    /// Новая цена
    pub price_cents: Option<i64>,
    /// Доступность для записи
    pub is_active: Option<bool>,
}

/// Параметры фильтрации списка услуг
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListServicesParams {
    /// Поиск по подстроке названия (без учёта регистра)
    pub q: Option<String>,
    /// Фильтр по доступности
    pub is_active: Option<bool>,
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

/// Список услуг
#[utoipa::path(
    get,
    path = "/api/v1/services",
    tag = "Services",
    params(ListServicesParams),
    responses(
        (status = 200, description = "Срез списка услуг", body = ApiResponse<PaginatedResponse<ServiceDto>>)
    )
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<ListServicesParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<ServiceDto>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let query = ServiceQuery {
        q: params.q,
        is_active: params.is_active,
        limit: params.limit,
        offset: params.offset,
    };
    match state.catalog.list(query).await {
        Ok(page) => Ok(Json(ApiResponse::success(PaginatedResponse::new(
            page.items.into_iter().map(Into::into).collect(),
            page.total,
            params.limit,
            params.offset,
        )))),
        Err(e) => Err(reject(e)),
    }
}

/// Создание услуги
#[utoipa::path(
    post,
    path = "/api/v1/services",
    tag = "Services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Услуга создана", body = ApiResponse<ServiceDto>),
        (status = 400, description = "Некорректные данные")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    req.validate().map_err(reject_invalid)?;
    match state
        .catalog
        .create(
            &req.name,
            req.duration_min,
            req.price_cents,
            req.is_active.unwrap_or(true),
        )
        .await
    {
        Ok(service) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(service.into())),
        )),
        Err(e) => Err(reject(e)),
    }
}

/// Получение услуги по ID
#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID услуги")),
    responses(
        (status = 200, description = "Данные услуги", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Услуга не найдена")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ServiceDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.catalog.get(id).await {
        Ok(service) => Ok(Json(ApiResponse::success(service.into()))),
        Err(e) => Err(reject(e)),
    }
}

/// Обновление услуги
#[utoipa::path(
    patch,
    path = "/api/v1/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID услуги")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Услуга обновлена", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Услуга не найдена")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<Json<ApiResponse<ServiceDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    req.validate().map_err(reject_invalid)?;
    match state
        .catalog
        .update(id, req.name, req.duration_min, req.price_cents, req.is_active)
        .await
    {
        Ok(service) => Ok(Json(ApiResponse::success(service.into()))),
        Err(e) => Err(reject(e)),
    }
}
