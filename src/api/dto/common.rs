//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Стандартная обёртка ответа API
///
/// Все REST-эндпоинты возвращают данные в этой обёртке.
/// При успехе: `{"success": true, "data": {...}}`,
/// при ошибке: `{"success": false, "error": "описание"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` если запрос выполнен успешно
    pub success: bool,
    /// Полезная нагрузка (данные). `null` при ошибке
    pub data: Option<T>,
    /// Описание ошибки. `null` при успехе
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Ответ с пагинацией
///
/// Содержит срез данных и общее количество элементов.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Массив элементов текущего среза
    pub items: Vec<T>,
    /// Общее количество элементов (по всем срезам)
    pub total: u64,
    /// Запрошенный лимит
    pub limit: u64,
    /// Запрошенное смещение
    pub offset: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, limit: u64, offset: u64) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_field() {
        let json = serde_json::to_value(ApiResponse::success("payload")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "payload");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_envelope_carries_the_message() {
        let json = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["error"], "boom");
    }
}
