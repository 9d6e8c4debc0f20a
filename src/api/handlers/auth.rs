//! Handler for Telegram login.

use axum::{Json, extract::State};
use serde_json::{Map, Value};

use crate::api::dto::auth::AuthResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Verifies a Telegram login widget payload and registers the user.
///
/// # Endpoint
///
/// `POST /api/auth`
///
/// # Request Body
///
/// The fields Telegram passed to the login widget callback, unchanged:
///
/// ```json
/// { "id": 7, "first_name": "Ann", "username": "ann", "auth_date": 1700000000, "hash": "..." }
/// ```
///
/// # Errors
///
/// - 403 if the signature does not verify
/// - 503 if no bot token is configured
pub async fn auth_handler(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.user_service.authenticate_telegram(&payload).await?;

    tracing::info!(user_id = user.id, "Telegram login accepted");

    Ok(Json(AuthResponse {
        message: "Authorization successful".to_string(),
        user: user.into(),
    }))
}
