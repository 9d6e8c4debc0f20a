#![allow(dead_code)]

use novel_likes::application::services::TogglePolicy;
use novel_likes::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub const BOT_TOKEN: &str = "123456:TEST-BOT-TOKEN";

pub async fn create_test_user(pool: &PgPool, id: i64) {
    sqlx::query("INSERT INTO users (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(format!("user{id}"))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_novel(pool: &PgPool, title: &str, likes_count: i32) -> i64 {
    sqlx::query_scalar("INSERT INTO novels (title, likes_count) VALUES ($1, $2) RETURNING id")
        .bind(title)
        .bind(likes_count)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_chapter(pool: &PgPool, novel_id: i64, number: i32) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO chapters (novel_id, number, title) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(novel_id)
    .bind(number)
    .bind(format!("Chapter {number}"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn novel_likes_count(pool: &PgPool, novel_id: i64) -> i32 {
    sqlx::query_scalar("SELECT likes_count FROM novels WHERE id = $1")
        .bind(novel_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn novel_like_rows(pool: &PgPool, novel_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM novel_likes WHERE novel_id = $1")
        .bind(novel_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn chapter_like_rows(pool: &PgPool, chapter_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM chapter_likes WHERE chapter_id = $1")
        .bind(chapter_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn test_policy() -> TogglePolicy {
    TogglePolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(20),
        timeout: Duration::from_secs(10),
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), test_policy(), Some(BOT_TOKEN.to_string()))
}

pub async fn user_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}
