//! Staff roster and availability handlers

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

use crate::api::dto::{ApiResponse, EmptyData, PaginatedResponse};
use crate::api::handlers::{reject, reject_invalid, AppState};
use crate::application::scheduling::Slot;
use crate::domain::{AvailabilityRule, StaffMember, StaffQuery};

/// Сотрудник
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffDto {
    /// Уникальный ID сотрудника
    pub id: Uuid,
    /// Полное имя
    pub full_name: String,
    /// Принимает ли сотрудник записи
    pub is_active: bool,
    /// Дата создания
    pub created_at: NaiveDateTime,
    /// Дата последнего обновления
    pub updated_at: NaiveDateTime,
}

impl From<StaffMember> for StaffDto {
    fn from(s: StaffMember) -> Self {
        Self {
            id: s.id,
            full_name: s.full_name,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Еженедельное окно доступности сотрудника
///
/// Минуты отсчитываются от полуночи: 540 = 09:00, 1020 = 17:00.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityRuleDto {
    /// Уникальный ID правила
    pub id: Uuid,
    /// ID сотрудника
    pub staff_id: Uuid,
    /// День недели: 0 = воскресенье … 6 = суббота
    pub day_of_week: i32,
    /// Начало окна в минутах от полуночи
    pub start_min: i32,
    /// Конец окна в минутах от полуночи (не включается)
    pub end_min: i32,
    /// Дата создания
    pub created_at: NaiveDateTime,
}

impl From<AvailabilityRule> for AvailabilityRuleDto {
    fn from(r: AvailabilityRule) -> Self {
        Self {
            id: r.id,
            staff_id: r.staff_id,
            day_of_week: r.day_of_week,
            start_min: r.start_min,
            end_min: r.end_min,
            created_at: r.created_at,
        }
    }
}

/// Свободный слот для записи
#[derive(Debug, Serialize, ToSchema)]
pub struct SlotDto {
    /// Начало слота
    pub start_at: NaiveDateTime,
    /// Конец слота (start_at + длительность услуги)
    pub end_at: NaiveDateTime,
}

impl From<Slot> for SlotDto {
    fn from(s: Slot) -> Self {
        Self {
            start_at: s.start_at,
            end_at: s.end_at,
        }
    }
}

/// Запрос на создание сотрудника
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateStaffRequest {
    /// Полное имя
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    /// Принимает ли записи (по умолчанию true)
    pub is_active: Option<bool>,
}

/// Запрос на обновление сотрудника
///
/// Partial update — передайте только изменяемые поля.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateStaffRequest {
    /// Новое полное имя
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    /// Принимает ли записи
    pub is_active: Option<bool>,
}

/// Запрос на добавление окна доступности
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAvailabilityRuleRequest {
    /// День недели: 0 = воскресенье … 6 = суббота
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i32,
    /// Начало окна в минутах от полуночи
    #[validate(range(min = 0, max = 1440))]
    pub start_min: i32,
    /// Конец окна в минутах от полуночи
    #[validate(range(min = 0, max = 1440))]
    pub end_min: i32,
}

/// Параметры фильтрации списка сотрудников
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListStaffParams {
    /// Поиск по подстроке имени (без учёта регистра)
    pub q: Option<String>,
    /// Фильтр по активности
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

/// Параметры запроса свободных слотов
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSlotsParams {
    /// Календарная дата в формате `YYYY-MM-DD`
    pub date: String,
    /// ID услуги (определяет длительность слота)
    pub service_id: Uuid,
    /// Шаг сетки слотов в минутах. По умолчанию из конфигурации (15)
    pub step_min: Option<i32>,
}

/// Список сотрудников
#[utoipa::path(
    get,
    path = "/api/v1/staff",
    tag = "Staff",
    params(ListStaffParams),
    responses(
        (status = 200, description = "Срез списка сотрудников", body = ApiResponse<PaginatedResponse<StaffDto>>)
    )
)]
pub async fn list_staff(
    State(state): State<AppState>,
    Query(params): Query<ListStaffParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<StaffDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let query = StaffQuery {
        q: params.q,
        is_active: params.is_active,
        limit: params.limit,
        offset: params.offset,
    };
    match state.staff.list(query).await {
        Ok(page) => Ok(Json(ApiResponse::success(PaginatedResponse::new(
            page.items.into_iter().map(Into::into).collect(),
            page.total,
            params.limit,
            params.offset,
        )))),
        Err(e) => Err(reject(e)),
    }
}

/// Создание сотрудника
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    tag = "Staff",
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Сотрудник создан", body = ApiResponse<StaffDto>),
        (status = 400, description = "Некорректные данные")
    )
)]
pub async fn create_staff(
    State(state): State<AppState>,
    Json(req): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StaffDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    req.validate().map_err(reject_invalid)?;
    match state
        .staff
        .create(&req.full_name, req.is_active.unwrap_or(true))
        .await
    {
        Ok(staff) => Ok((StatusCode::CREATED, Json(ApiResponse::success(staff.into())))),
        Err(e) => Err(reject(e)),
    }
}

/// Получение сотрудника по ID
#[utoipa::path(
    get,
    path = "/api/v1/staff/{id}",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID сотрудника")),
    responses(
        (status = 200, description = "Данные сотрудника", body = ApiResponse<StaffDto>),
        (status = 404, description = "Сотрудник не найден")
    )
)]
pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StaffDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.staff.get(id).await {
        Ok(staff) => Ok(Json(ApiResponse::success(staff.into()))),
        Err(e) => Err(reject(e)),
    }
}

/// Обновление сотрудника
#[utoipa::path(
    patch,
    path = "/api/v1/staff/{id}",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID сотрудника")),
    request_body = UpdateStaffRequest,
    responses(
        (status = 200, description = "Сотрудник обновлён", body = ApiResponse<StaffDto>),
        (status = 404, description = "Сотрудник не найден")
    )
)]
pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStaffRequest>,
) -> Result<Json<ApiResponse<StaffDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    req.validate().map_err(reject_invalid)?;
    match state.staff.update(id, req.full_name, req.is_active).await {
        Ok(staff) => Ok(Json(ApiResponse::success(staff.into()))),
        Err(e) => Err(reject(e)),
    }
}

/// Окна доступности сотрудника
///
/// Возвращает все еженедельные окна, отсортированные по дню недели
/// и началу окна.
#[utoipa::path(
    get,
    path = "/api/v1/staff/{id}/availability",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID сотрудника")),
    responses(
        (status = 200, description = "Список окон доступности", body = ApiResponse<Vec<AvailabilityRuleDto>>),
        (status = 404, description = "Сотрудник не найден")
    )
)]
pub async fn list_availability_rules(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<AvailabilityRuleDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.staff.list_availability(id).await {
        Ok(rules) => Ok(Json(ApiResponse::success(
            rules.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

/// Добавление окна доступности
///
/// Повторная отправка идентичного окна (день, начало, конец) возвращает
/// существующее правило без создания дубликата.
#[utoipa::path(
    post,
    path = "/api/v1/staff/{id}/availability",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID сотрудника")),
    request_body = CreateAvailabilityRuleRequest,
    responses(
        (status = 201, description = "Окно добавлено", body = ApiResponse<AvailabilityRuleDto>),
        (status = 400, description = "Некорректное окно"),
        (status = 404, description = "Сотрудник не найден")
    )
)]
pub async fn add_availability_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateAvailabilityRuleRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<AvailabilityRuleDto>>),
    (StatusCode, Json<ApiResponse<()>>),
> {
    req.validate().map_err(reject_invalid)?;
    match state
        .staff
        .add_availability_rule(id, req.day_of_week, req.start_min, req.end_min)
        .await
    {
        Ok(rule) => Ok((StatusCode::CREATED, Json(ApiResponse::success(rule.into())))),
        Err(e) => Err(reject(e)),
    }
}

/// Удаление окна доступности
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{id}/availability/{rule_id}",
    tag = "Staff",
    params(
        ("id" = Uuid, Path, description = "ID сотрудника"),
        ("rule_id" = Uuid, Path, description = "ID правила")
    ),
    responses(
        (status = 200, description = "Окно удалено", body = ApiResponse<EmptyData>),
        (status = 404, description = "Сотрудник или правило не найдены")
    )
)]
pub async fn delete_availability_rule(
    State(state): State<AppState>,
    Path((id, rule_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.staff.delete_availability_rule(id, rule_id).await {
        Ok(()) => Ok(Json(ApiResponse::success(EmptyData {}))),
        Err(e) => Err(reject(e)),
    }
}

/// Свободные слоты на дату
///
/// Перечисляет свободные интервалы длиной в услугу с шагом `step_min`.
/// Слот, пересекающийся с существующей записью или выходящий за
/// полночь, не возвращается.
#[utoipa::path(
    get,
    path = "/api/v1/staff/{id}/slots",
    tag = "Staff",
    params(
        ("id" = Uuid, Path, description = "ID сотрудника"),
        ListSlotsParams
    ),
    responses(
        (status = 200, description = "Список свободных слотов", body = ApiResponse<Vec<SlotDto>>),
        (status = 400, description = "Некорректная дата, шаг или неактивная услуга"),
        (status = 404, description = "Сотрудник или услуга не найдены")
    )
)]
pub async fn list_slots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListSlotsParams>,
) -> Result<Json<ApiResponse<Vec<SlotDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let step_min = params.step_min.unwrap_or(state.default_step_min);
    match state
        .staff
        .list_slots(id, &params.date, params.service_id, step_min)
        .await
    {
        Ok(slots) => Ok(Json(ApiResponse::success(
            slots.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}
