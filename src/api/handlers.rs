//! HTTP request handlers

use super::types::{ErrorResponse, ExotelWebhook};
use super::AppState;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Provider webhook: one POST per call turn
        .route("/exotel", post(exotel_webhook))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Webhook
// ============================================================

/// Handle one turn of a live call.
///
/// The provider expects a plain-text body to speak back to the caller, so
/// every screening outcome is a `200` with text; only a malformed request
/// (missing call id) is rejected at the transport boundary.
async fn exotel_webhook(
    State(state): State<AppState>,
    Form(payload): Form<ExotelWebhook>,
) -> Result<String, AppError> {
    if payload.call_sid.trim().is_empty() {
        return Err(AppError::BadRequest("CallSid is required".to_string()));
    }

    let reply = state
        .screener
        .handle_turn(&payload.call_sid, &payload.speech_result, &payload.from)
        .await;

    Ok(reply)
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("call_screen ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
