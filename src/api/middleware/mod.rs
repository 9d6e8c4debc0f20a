//! HTTP middleware.
//!
//! - [`rate_limit`] - Per-IP token bucket limits
//! - [`tracing`] - Request/response logging

pub mod rate_limit;
pub mod tracing;
