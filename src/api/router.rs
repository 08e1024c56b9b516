use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, change_booking_status, check_availability, create_booking, list_owner_bookings,
    list_user_bookings,
};

/// Creates the API router with all booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /bookings - Create a new booking
/// - POST /bookings/:id/status - Change booking status (owner only)
///
/// Query endpoints (Read operations):
/// - POST /bookings/check-availability - List cars free for a date range
/// - GET /bookings/user - List the caller's bookings
/// - GET /bookings/owner - List bookings on the caller's cars (owner only)
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Query endpoints
        .route("/bookings/check-availability", post(check_availability))
        .route("/bookings/user", get(list_user_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        // Command endpoints
        .route("/bookings", post(create_booking))
        .route("/bookings/:id/status", post(change_booking_status))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
