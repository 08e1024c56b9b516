use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
/// ボディは常に `{ "success": false, "message": … }` のエンベロープ。
#[derive(Debug)]
pub struct ApiError(BookingApplicationError);

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            // 409 Conflict - 指定期間に重なる予約が既に存在する
            BookingApplicationError::CarNotAvailable => {
                (StatusCode::CONFLICT, "Car is not available".to_string())
            }

            // 404 Not Found - リクエストされたリソースが存在しない
            BookingApplicationError::CarNotFound => {
                (StatusCode::NOT_FOUND, "Car not found".to_string())
            }
            BookingApplicationError::BookingNotFound => {
                (StatusCode::NOT_FOUND, "Booking not found".to_string())
            }

            // 403 Forbidden - ロールまたは所有権の不一致
            BookingApplicationError::Unauthorized => {
                (StatusCode::FORBIDDEN, "Unauthorized".to_string())
            }

            // 422 Unprocessable Entity - リクエスト内容の検証エラー
            BookingApplicationError::InvalidDateRange => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Return date must not be before pickup date".to_string(),
            ),
            BookingApplicationError::InvalidStatus(ref s) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid booking status: {}", s),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookingApplicationError::BookingStoreError(ref e) => {
                tracing::error!("Booking store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
            BookingApplicationError::CarCatalogError(ref e) => {
                tracing::error!("Car catalog error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
            BookingApplicationError::UserDirectoryError(ref e) => {
                tracing::error!("User directory error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
