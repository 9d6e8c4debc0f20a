//! Handlers for like endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::like::{LikeResponse, LikeStatusQuery, ToggleLikeRequest};
use crate::application::services::like_service::validate_id;
use crate::domain::entities::EntityKind;
use crate::error::AppError;
use crate::state::AppState;

/// Toggles the caller's like on a novel.
///
/// # Endpoint
///
/// `POST /api/novels/{novel_id}/like`
///
/// # Request Body
///
/// ```json
/// { "userId": 7, "userName": "Ann" }
/// ```
///
/// Ids are validated first; the user row is then created on first use before
/// the toggle runs.
///
/// # Response
///
/// ```json
/// { "likes_count": 4, "is_liked": true }
/// ```
///
/// # Errors
///
/// - 400 if ids are not positive
/// - 404 if the novel does not exist
/// - 409 if concurrent updates kept conflicting; safe to retry
/// - 503 if the database is unavailable or the deadline passed
pub async fn toggle_novel_like_handler(
    State(state): State<AppState>,
    Path(novel_id): Path<i64>,
    Json(payload): Json<ToggleLikeRequest>,
) -> Result<Json<LikeResponse>, AppError> {
    validate_id("novel_id", novel_id)?;
    payload.validate()?;

    state
        .user_service
        .ensure_user(payload.user_id, payload.user_name)
        .await?;

    let like = state
        .like_service
        .toggle_like(EntityKind::Novel, novel_id, payload.user_id)
        .await?;

    Ok(Json(like.into()))
}

/// Toggles the caller's like on a chapter of a novel.
///
/// # Endpoint
///
/// `POST /api/novels/{novel_id}/chapters/{chapter_id}/like`
///
/// Same body, response and errors as [`toggle_novel_like_handler`]; a chapter
/// that belongs to another novel is reported as 404.
pub async fn toggle_chapter_like_handler(
    State(state): State<AppState>,
    Path((novel_id, chapter_id)): Path<(i64, i64)>,
    Json(payload): Json<ToggleLikeRequest>,
) -> Result<Json<LikeResponse>, AppError> {
    validate_id("novel_id", novel_id)?;
    validate_id("chapter_id", chapter_id)?;
    payload.validate()?;

    state
        .user_service
        .ensure_user(payload.user_id, payload.user_name)
        .await?;

    let like = state
        .like_service
        .toggle_chapter_like(novel_id, chapter_id, payload.user_id)
        .await?;

    Ok(Json(like.into()))
}

/// Returns the novel's like count and whether the user likes it.
///
/// # Endpoint
///
/// `GET /api/novels/{novel_id}/like?user_id=7`
pub async fn novel_like_status_handler(
    State(state): State<AppState>,
    Path(novel_id): Path<i64>,
    Query(query): Query<LikeStatusQuery>,
) -> Result<Json<LikeResponse>, AppError> {
    query.validate()?;

    let like = state
        .like_service
        .like_status(EntityKind::Novel, novel_id, query.user_id)
        .await?;

    Ok(Json(like.into()))
}

/// Returns the chapter's like count and whether the user likes it.
///
/// # Endpoint
///
/// `GET /api/novels/{novel_id}/chapters/{chapter_id}/like?user_id=7`
pub async fn chapter_like_status_handler(
    State(state): State<AppState>,
    Path((novel_id, chapter_id)): Path<(i64, i64)>,
    Query(query): Query<LikeStatusQuery>,
) -> Result<Json<LikeResponse>, AppError> {
    query.validate()?;

    let like = state
        .like_service
        .chapter_like_status(novel_id, chapter_id, query.user_id)
        .await?;

    Ok(Json(like.into()))
}
