use crate::application::booking::{
    BookingApplicationError, ServiceDependencies, change_booking_status as execute_change_status,
    check_availability_of_cars, create_booking as execute_create_booking, get_owner_bookings,
    get_user_bookings,
};
use crate::domain::booking::{BookingStatus, DateRange};
use crate::domain::value_objects::{BookingId, CarId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    auth::AuthenticatedUser,
    error::ApiError,
    types::{
        AvailableCarsResponse, BookingCreatedResponse, BookingResponse, BookingsResponse,
        ChangeStatusRequest, CheckAvailabilityRequest, CreateBookingRequest,
        StatusUpdatedResponse,
    },
};

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// POST /bookings/check-availability - 指定ロケーション・期間の予約可能な車両を検索
///
/// 掲載中の車両のうち、リクエストされた期間に重なる予約がないものだけを返す。
/// 認証不要（ブラウズ用の公開エンドポイント）。
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckAvailabilityRequest>,
) -> Result<Json<AvailableCarsResponse>, ApiError> {
    let range =
        DateRange::new(req.pickup_date, req.return_date).map_err(BookingApplicationError::from)?;

    let cars = check_availability_of_cars(&state.service_deps, &req.location, &range).await?;

    Ok(Json(AvailableCarsResponse {
        success: true,
        available_cars: cars.into_iter().map(Into::into).collect(),
    }))
}

/// POST /bookings - 新しい予約を作成
///
/// 強制されるビジネスルール:
/// - 指定期間に重なる既存予約がないこと
/// - 車両が存在すること
/// - 料金は作成時に一度だけ計算される
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    let range =
        DateRange::new(req.pickup_date, req.return_date).map_err(BookingApplicationError::from)?;
    let car_id = CarId::from_uuid(req.car_id);

    let booking = execute_create_booking(&state.service_deps, auth.user_id, car_id, range).await?;

    let response = BookingCreatedResponse {
        success: true,
        message: "Booking created".to_string(),
        booking: BookingResponse::from(booking),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /bookings/user - 認証済みユーザーの予約一覧を取得
///
/// 各予約に車両情報を結合し、作成日時の降順で返す。
pub async fn list_user_bookings(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<Json<BookingsResponse>, ApiError> {
    let bookings = get_user_bookings(&state.service_deps, auth.user_id).await?;

    Ok(Json(BookingsResponse {
        success: true,
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

/// GET /bookings/owner - オーナーの予約一覧を取得
///
/// 強制されるビジネスルール:
/// - 呼び出し元のロールがownerであること
///
/// 各予約に車両情報と予約者の公開プロフィールを結合して返す。
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<Json<BookingsResponse>, ApiError> {
    let bookings = get_owner_bookings(&state.service_deps, auth.user_id, auth.role).await?;

    Ok(Json(BookingsResponse {
        success: true,
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

/// POST /bookings/:id/status - 予約のステータスを変更
///
/// 強制されるビジネスルール:
/// - 予約が存在すること
/// - 呼び出し元が予約に記録されたオーナーであること
/// - ステータスが列挙値（pending/confirmed/cancelled）に含まれること
pub async fn change_booking_status(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<StatusUpdatedResponse>, ApiError> {
    let status = BookingStatus::from_str(&req.status)
        .map_err(|_| BookingApplicationError::InvalidStatus(req.status.clone()))?;
    let booking_id = BookingId::from_uuid(booking_id);

    execute_change_status(&state.service_deps, auth.user_id, booking_id, status).await?;

    Ok(Json(StatusUpdatedResponse {
        success: true,
        message: "Status updated".to_string(),
    }))
}
