//! Helper functions used across the application.
//!
//! - [`telegram`] - Telegram login widget signature verification

pub mod telegram;
