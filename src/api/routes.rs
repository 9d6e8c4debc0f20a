//! API route configuration.

use crate::api::handlers::{
    auth_handler, chapter_like_status_handler, novel_like_status_handler,
    toggle_chapter_like_handler, toggle_novel_like_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Like routes.
///
/// # Endpoints
///
/// - `GET  /novels/{novel_id}/like`                        - Novel like status
/// - `POST /novels/{novel_id}/like`                        - Toggle a novel like
/// - `GET  /novels/{novel_id}/chapters/{chapter_id}/like`  - Chapter like status
/// - `POST /novels/{novel_id}/chapters/{chapter_id}/like`  - Toggle a chapter like
pub fn like_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/novels/{novel_id}/like",
            get(novel_like_status_handler).post(toggle_novel_like_handler),
        )
        .route(
            "/novels/{novel_id}/chapters/{chapter_id}/like",
            get(chapter_like_status_handler).post(toggle_chapter_like_handler),
        )
}

/// Login routes.
///
/// - `POST /auth` - Telegram login widget verification
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(auth_handler))
}
