use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::booking::BookingDetails;
use crate::ports::{BookingView, CarView, UserProfile};

/// 空き状況検索リクエスト（POST /bookings/check-availability）
///
/// 日付はRFC 3339のUTCタイムスタンプとしてパースされる。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
    pub location: String,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
}

/// 予約作成リクエスト（POST /bookings)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub car_id: Uuid,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
}

/// ステータス変更リクエスト（POST /bookings/:id/status）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub status: String,
}

/// 車両レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub car_id: Uuid,
    pub owner_id: Uuid,
    pub brand: String,
    pub model: String,
    pub location: String,
    pub price_per_day: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CarView> for CarResponse {
    fn from(car: CarView) -> Self {
        Self {
            car_id: car.car_id.value(),
            owner_id: car.owner_id.value(),
            brand: car.brand,
            model: car.model,
            location: car.location,
            price_per_day: car.price_per_day,
            is_available: car.is_available,
            created_at: car.created_at,
        }
    }
}

/// ユーザーレスポンス（公開プロフィールのみ、認証情報は含まない）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id.value(),
            name: profile.name,
            email: profile.email,
            role: profile.role.as_str().to_string(),
        }
    }
}

/// 予約レスポンス
///
/// 一覧系クエリでは参照先の車両・ユーザーが結合されて返る。
/// 日付はchronoのserdeによりRFC 3339のテキスト形式で直列化される。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub car_id: Uuid,
    pub owner_id: Uuid,
    pub user_id: Uuid,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<CarResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<BookingView> for BookingResponse {
    fn from(booking: BookingView) -> Self {
        Self {
            booking_id: booking.booking_id.value(),
            car_id: booking.car_id.value(),
            owner_id: booking.owner_id.value(),
            user_id: booking.user_id.value(),
            pickup_date: booking.pickup_date,
            return_date: booking.return_date,
            price: booking.price,
            status: booking.status.as_str().to_string(),
            created_at: booking.created_at,
            car: None,
            user: None,
        }
    }
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        let mut response = BookingResponse::from(details.booking);
        response.car = details.car.map(CarResponse::from);
        response.user = details.user.map(UserResponse::from);
        response
    }
}

/// 空き状況検索レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCarsResponse {
    pub success: bool,
    pub available_cars: Vec<CarResponse>,
}

/// 予約作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub message: String,
    pub booking: BookingResponse,
}

/// 予約一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub success: bool,
    pub bookings: Vec<BookingResponse>,
}

/// ステータス変更レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdatedResponse {
    pub success: bool,
    pub message: String,
}

/// エラーレスポンス
///
/// すべての失敗は `{ "success": false, "message": … }` のエンベロープで返す。
/// エラーがトランスポート層へ未処理のまま伝播することはない。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
