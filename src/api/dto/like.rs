//! DTOs for like endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::LikeState;

/// Request body for toggling a like.
///
/// The Mini-App sends camelCase keys; snake_case is accepted too.
///
/// # Example
///
/// ```json
/// { "userId": 7, "userName": "Ann" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct ToggleLikeRequest {
    #[serde(rename = "userId", alias = "user_id")]
    #[validate(range(min = 1, message = "userId must be positive"))]
    pub user_id: i64,

    #[serde(default, rename = "userName", alias = "user_name")]
    #[validate(length(max = 256))]
    pub user_name: Option<String>,
}

/// Query string for reading like status.
#[derive(Debug, Deserialize, Validate)]
pub struct LikeStatusQuery {
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: i64,
}

/// Like state returned to the client.
///
/// # Example
///
/// ```json
/// { "likes_count": 4, "is_liked": true }
/// ```
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub likes_count: i32,
    pub is_liked: bool,
}

impl From<LikeState> for LikeResponse {
    fn from(state: LikeState) -> Self {
        Self {
            likes_count: state.likes_count,
            is_liked: state.is_liked,
        }
    }
}
