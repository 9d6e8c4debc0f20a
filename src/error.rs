//! Application error type and its HTTP representation.
//!
//! Every store failure is classified here, at the transaction boundary, into
//! one of the variants below. Handlers never see raw `sqlx` errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// PostgreSQL `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned in JSON bodies.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    /// Login data failed signature verification.
    #[error("{message}")]
    Forbidden { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// Serialization failure, deadlock or a lost unique-key race. Retryable.
    #[error("{message}")]
    Conflict { message: String, details: Value },
    /// The store could not be reached or did not answer in time.
    #[error("{message}")]
    Unavailable { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Whether repeating the whole operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }

    /// Stable error code used in JSON bodies and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Forbidden { .. } => "forbidden",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Unavailable { .. } => "unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::Forbidden { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Unavailable { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({})),
        )
    }
}

/// Classifies a store error into the application taxonomy.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        let code = db.code();
        let code = code.as_deref();

        if matches!(code, Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)) {
            tracing::warn!(sqlstate = ?code, "Transaction aborted by concurrent update");
            return AppError::conflict(
                "Concurrent update, retry the request",
                json!({ "sqlstate": code }),
            );
        }
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        if db.is_foreign_key_violation() {
            return AppError::not_found(
                "Referenced row does not exist",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %db, sqlstate = ?code, "Database error");
        return AppError::internal("Database error", json!({ "constraint": db.constraint() }));
    }

    match e {
        sqlx::Error::RowNotFound => AppError::not_found("Row not found", json!({})),
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            tracing::error!(error = %e, "Database unavailable");
            AppError::unavailable("Database unavailable", json!({}))
        }
        other => {
            tracing::error!(error = %other, "Database error");
            AppError::internal("Database error", json!({}))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::forbidden("x", json!({})), StatusCode::FORBIDDEN),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (AppError::conflict("x", json!({})), StatusCode::CONFLICT),
            (
                AppError::unavailable("x", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::internal("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_only_conflict_is_retryable() {
        assert!(AppError::conflict("x", json!({})).is_retryable());
        assert!(!AppError::not_found("x", json!({})).is_retryable());
        assert!(!AppError::unavailable("x", json!({})).is_retryable());
        assert!(!AppError::internal("x", json!({})).is_retryable());
    }

    #[test]
    fn test_transport_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            AppError::Unavailable { .. }
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            AppError::Unavailable { .. }
        ));
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Io(io)),
            AppError::Unavailable { .. }
        ));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            AppError::NotFound { .. }
        ));
    }

    #[test]
    fn test_error_info_carries_code() {
        let info = AppError::conflict("busy", json!({ "sqlstate": "40001" })).to_error_info();
        assert_eq!(info.code, "conflict");
        assert_eq!(info.message, "busy");
        assert_eq!(info.details["sqlstate"], "40001");
    }
}
