//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{LikeService, TogglePolicy, UserService};
use crate::infrastructure::persistence::{PgLikeRepository, PgUserRepository};

#[derive(Clone)]
pub struct AppState {
    pub like_service: Arc<LikeService<PgLikeRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub db: Arc<PgPool>,
}

impl AppState {
    /// Builds repositories and services on top of one connection pool.
    pub fn new(pool: Arc<PgPool>, policy: TogglePolicy, telegram_bot_token: Option<String>) -> Self {
        let like_repository = Arc::new(PgLikeRepository::new(pool.clone()));
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

        Self {
            like_service: Arc::new(LikeService::new(like_repository, policy)),
            user_service: Arc::new(UserService::new(user_repository, telegram_bot_token)),
            db: pool,
        }
    }
}
