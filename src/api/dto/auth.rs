//! DTOs for Telegram login.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::User;

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserItem,
}
