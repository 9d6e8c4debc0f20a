//! User bootstrap and Telegram login service.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::telegram::verify_login;

const MAX_NAME_CHARS: usize = 128;

/// Service ensuring user rows exist before they are referenced by likes.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    telegram_bot_token: Option<String>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    ///
    /// Without a bot token, Telegram logins are refused.
    pub fn new(repository: Arc<R>, telegram_bot_token: Option<String>) -> Self {
        Self {
            repository,
            telegram_bot_token,
        }
    }

    /// Creates the user if missing and refreshes a non-empty display name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `id` is not positive.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn ensure_user(&self, id: i64, name: Option<String>) -> Result<User, AppError> {
        if id <= 0 {
            return Err(AppError::bad_request(
                "user_id must be a positive integer",
                json!({ "field": "user_id", "value": id }),
            ));
        }

        let name: String = name
            .unwrap_or_default()
            .trim()
            .chars()
            .take(MAX_NAME_CHARS)
            .collect();

        if let Some(existing) = self.repository.find_by_id(id).await?
            && (name.is_empty() || name == existing.name)
        {
            return Ok(existing);
        }

        tracing::debug!(user_id = id, "Upserting user");
        self.repository.upsert(NewUser { id, name }).await
    }

    /// Verifies a Telegram login widget payload and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if no bot token is configured.
    /// Returns [`AppError::Forbidden`] if the signature does not verify.
    /// Returns [`AppError::Validation`] if the payload carries no usable user id.
    pub async fn authenticate_telegram(&self, fields: &Map<String, Value>) -> Result<User, AppError> {
        let Some(bot_token) = self.telegram_bot_token.as_deref() else {
            return Err(AppError::unavailable(
                "Telegram login is not configured",
                json!({}),
            ));
        };

        verify_login(fields, bot_token).map_err(|e| {
            tracing::warn!(error = %e, "Rejected Telegram login");
            AppError::forbidden(
                "Invalid Telegram authorization",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let id = telegram_user_id(fields).ok_or_else(|| {
            AppError::bad_request("Telegram payload has no user id", json!({ "field": "id" }))
        })?;

        self.ensure_user(id, display_name(fields)).await
    }
}

fn telegram_user_id(fields: &Map<String, Value>) -> Option<i64> {
    match fields.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn display_name(fields: &Map<String, Value>) -> Option<String> {
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    match (text("first_name"), text("last_name")) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(first), None) => Some(first.to_string()),
        (None, Some(last)) => Some(last.to_string()),
        (None, None) => text("username").map(str::to_string),
    }
}
