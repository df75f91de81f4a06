//! Appointment lifecycle handlers

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
use crate::domain::Appointment;

/// Запись на услугу
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentDto {
    /// Уникальный ID записи
    pub id: Uuid,
    /// ID клиента
    pub customer_id: Uuid,
    /// ID сотрудника
    pub staff_id: Uuid,
    /// ID услуги
    pub service_id: Uuid,
    /// Статус: `BOOKED` или `CANCELLED`
    pub status: String,
    /// Начало записи
    pub start_at: NaiveDateTime,
    /// Конец записи (не включается)
    pub end_at: NaiveDateTime,
    /// Заметки. Причина отмены добавляется строкой `[CANCELLED] …`
    pub notes: Option<String>,
    /// Время отмены
    pub cancelled_at: Option<NaiveDateTime>,
    /// Дата создания
    pub created_at: NaiveDateTime,
    /// Дата последнего обновления
    pub updated_at: NaiveDateTime,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            customer_id: a.customer_id,
            staff_id: a.staff_id,
            service_id: a.service_id,
            status: a.status.as_str().to_string(),
            start_at: a.start_at,
            end_at: a.end_at,
            notes: a.notes,
            cancelled_at: a.cancelled_at,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Запрос на создание записи
///
/// Конец записи вычисляется из длительности услуги.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    /// ID клиента
    pub customer_id: Uuid,
    /// ID сотрудника
    pub staff_id: Uuid,
    /// ID услуги
    pub service_id: Uuid,
    /// Начало записи (ISO 8601, напр. `2026-03-02T09:00:00`)
    pub start_at: String,
    /// Заметки
    pub notes: Option<String>,
}

/// Запрос на отмену записи
#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelAppointmentRequest {
    /// Причина отмены. Добавляется к заметкам записи
    pub reason: Option<String>,
}

/// Запрос на перенос записи
#[derive(Debug, Deserialize, ToSchema)]
pub struct RescheduleAppointmentRequest {
    /// Новое начало записи (ISO 8601)
    pub start_at: String,
    /// Новые заметки. Если не переданы, прежние сохраняются
    pub notes: Option<String>,
}

/// Параметры списка записей
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct ListAppointmentsParams {
    /// ID сотрудника
    pub staff_id: Uuid,
    /// Начало окна (ISO 8601)
    pub from: String,
    /// Конец окна (ISO 8601)
    pub to: String,
    /// Количество элементов. По умолчанию 50
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 200))]
    pub limit: u64,
    /// Смещение от начала списка. По умолчанию 0
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

/// Создание записи
///
/// Проверяет, что интервал не пересекает полночь, попадает в окно
/// доступности сотрудника и не конфликтует с существующими записями.
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    tag = "Appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Запись создана", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Некорректное время, неактивный сотрудник или услуга"),
        (status = 404, description = "Клиент, сотрудник или услуга не найдены"),
        (status = 409, description = "Интервал уже занят другой записью")
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AppointmentDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .appointments
        .create(
            req.customer_id,
            req.staff_id,
            req.service_id,
            &req.start_at,
            req.notes,
        )
        .await
    {
        Ok(appointment) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(appointment.into())),
        )),
        Err(e) => Err(reject(e)),
    }
}

/// Список записей сотрудника
///
/// Возвращает записи со статусом `BOOKED`, целиком лежащие в окне
/// `[from, to]`, отсортированные по началу.
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    tag = "Appointments",
    params(ListAppointmentsParams),
    responses(
        (status = 200, description = "Срез списка записей", body = ApiResponse<PaginatedResponse<AppointmentDto>>),
        (status = 400, description = "Некорректное окно"),
        (status = 404, description = "Сотрудник не найден")
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<ListAppointmentsParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<AppointmentDto>>>,
    (StatusCode, Json<ApiResponse<()>>),
> {
    params.validate().map_err(reject_invalid)?;
    match state
        .appointments
        .list(
            params.staff_id,
            &params.from,
            &params.to,
            params.limit,
            params.offset,
        )
        .await
    {
        Ok(page) => Ok(Json(ApiResponse::success(PaginatedResponse::new(
            page.items.into_iter().map(Into::into).collect(),
            page.total,
            params.limit,
            params.offset,
        )))),
        Err(e) => Err(reject(e)),
    }
}

/// Отмена записи
///
/// Идемпотентна: повторная отмена возвращает запись без изменений.
#[utoipa::path(
    post,
    path = "/api/v1/appointments/{id}/cancel",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID записи")),
    request_body = CancelAppointmentRequest,
    responses(
        (status = 200, description = "Запись отменена", body = ApiResponse<AppointmentDto>),
        (status = 404, description = "Запись не найдена")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CancelAppointmentRequest>,
) -> Result<Json<ApiResponse<AppointmentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.appointments.cancel(id, req.reason.as_deref()).await {
        Ok(appointment) => Ok(Json(ApiResponse::success(appointment.into()))),
        Err(e) => Err(reject(e)),
    }
}

/// Перенос записи
///
/// Длительность берётся из привязанной услуги. Проверка конфликтов
/// исключает саму переносимую запись.
#[utoipa::path(
    post,
    path = "/api/v1/appointments/{id}/reschedule",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID записи")),
    request_body = RescheduleAppointmentRequest,
    responses(
        (status = 200, description = "Запись перенесена", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Запись отменена или новое время некорректно"),
        (status = 404, description = "Запись не найдена"),
        (status = 409, description = "Новый интервал занят другой записью")
    )
)]
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RescheduleAppointmentRequest>,
) -> Result<Json<ApiResponse<AppointmentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .appointments
        .reschedule(id, &req.start_at, req.notes)
        .await
    {
        Ok(appointment) => Ok(Json(ApiResponse::success(appointment.into()))),
        Err(e) => Err(reject(e)),
    }
}
