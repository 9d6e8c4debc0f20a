//! User entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A platform user, keyed by Telegram user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }
}

/// Input for creating or refreshing a user row.
///
/// An empty `name` never overwrites a name that is already stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: i64,
    pub name: String,
}
