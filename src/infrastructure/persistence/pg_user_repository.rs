//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

type UserRow = (i64, String, DateTime<Utc>);

pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert(&self, user: NewUser) -> Result<User, AppError> {
        let (id, name, created_at) = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
                SET name = CASE WHEN EXCLUDED.name = '' THEN users.name ELSE EXCLUDED.name END
            RETURNING id, name, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(User::new(id, name, created_at))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(id, name, created_at)| User::new(id, name, created_at)))
    }
}
