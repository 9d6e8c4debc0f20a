//! Business logic services for the application layer.

pub mod like_service;
pub mod user_service;

pub use like_service::{LikeService, TogglePolicy};
pub use user_service::UserService;
