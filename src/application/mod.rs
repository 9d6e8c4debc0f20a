//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::like_service::LikeService`] - Like toggling with conflict retries and deadlines
//! - [`services::user_service::UserService`] - User bootstrap and Telegram login

pub mod services;
