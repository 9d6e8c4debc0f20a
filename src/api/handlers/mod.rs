//! HTTP request handlers for API endpoints.

pub mod auth;
pub mod health;
pub mod likes;

pub use auth::auth_handler;
pub use health::health_handler;
pub use likes::{
    chapter_like_status_handler, novel_like_status_handler, toggle_chapter_like_handler,
    toggle_novel_like_handler,
};
