//! PostgreSQL implementation of the like repository.
//!
//! Table and column names come from [`LikeTarget`] descriptors, which are
//! compile-time constants; ids are always bound as parameters.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CounterDrift, EntityKind, LikeState, LikeTarget};
use crate::domain::repositories::LikeRepository;
use crate::error::AppError;

/// PostgreSQL repository for like relations and counters.
pub struct PgLikeRepository {
    pool: Arc<PgPool>,
}

impl PgLikeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn lock_entity_sql(t: &LikeTarget) -> String {
    format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", t.entity_table)
}

fn delete_relation_sql(t: &LikeTarget) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 AND user_id = $2",
        t.relation_table, t.foreign_key
    )
}

fn insert_relation_sql(t: &LikeTarget) -> String {
    format!(
        "INSERT INTO {} ({}, user_id) VALUES ($1, $2)",
        t.relation_table, t.foreign_key
    )
}

fn bump_counter_sql(t: &LikeTarget) -> String {
    format!(
        "UPDATE {} SET likes_count = likes_count + $2 WHERE id = $1 RETURNING likes_count",
        t.entity_table
    )
}

fn status_sql(t: &LikeTarget) -> String {
    format!(
        r#"
        SELECT e.likes_count,
               EXISTS (SELECT 1 FROM {rel} l WHERE l.{fk} = e.id AND l.user_id = $2) AS is_liked
        FROM {entity} e
        WHERE e.id = $1
        "#,
        entity = t.entity_table,
        rel = t.relation_table,
        fk = t.foreign_key
    )
}

fn drift_sql(t: &LikeTarget) -> String {
    format!(
        r#"
        SELECT e.id, e.likes_count, COUNT(l.user_id) AS actual
        FROM {entity} e
        LEFT JOIN {rel} l ON l.{fk} = e.id
        GROUP BY e.id, e.likes_count
        HAVING e.likes_count <> COUNT(l.user_id)
        ORDER BY e.id
        "#,
        entity = t.entity_table,
        rel = t.relation_table,
        fk = t.foreign_key
    )
}

fn repair_sql(t: &LikeTarget) -> String {
    format!(
        r#"
        UPDATE {entity} e
        SET likes_count = c.actual
        FROM (
            SELECT x.id, COUNT(l.user_id)::INTEGER AS actual
            FROM {entity} x
            LEFT JOIN {rel} l ON l.{fk} = x.id
            GROUP BY x.id
        ) c
        WHERE e.id = c.id AND e.likes_count <> c.actual
        "#,
        entity = t.entity_table,
        rel = t.relation_table,
        fk = t.foreign_key
    )
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn toggle(
        &self,
        kind: EntityKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError> {
        let target = kind.target();
        let mut tx = self.pool.begin().await?;

        // Every toggler on this entity queues here until the holder commits.
        let locked = sqlx::query_scalar::<_, i64>(&lock_entity_sql(&target))
            .bind(entity_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Err(AppError::not_found(
                format!("{} not found", capitalize(kind.as_str())),
                json!({ "kind": kind.as_str(), "id": entity_id }),
            ));
        }

        let deleted = sqlx::query(&delete_relation_sql(&target))
            .bind(entity_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let is_liked = if deleted > 0 {
            false
        } else {
            sqlx::query(&insert_relation_sql(&target))
                .bind(entity_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            true
        };

        let delta: i32 = if is_liked { 1 } else { -1 };
        let likes_count = sqlx::query_scalar::<_, i32>(&bump_counter_sql(&target))
            .bind(entity_id)
            .bind(delta)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(LikeState::new(likes_count, is_liked))
    }

    async fn status(
        &self,
        kind: EntityKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError> {
        let target = kind.target();

        let row = sqlx::query_as::<_, (i32, bool)>(&status_sql(&target))
            .bind(entity_id)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(|(likes_count, is_liked)| LikeState::new(likes_count, is_liked))
            .ok_or_else(|| {
                AppError::not_found(
                    format!("{} not found", capitalize(kind.as_str())),
                    json!({ "kind": kind.as_str(), "id": entity_id }),
                )
            })
    }

    async fn chapter_in_novel(&self, novel_id: i64, chapter_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM chapters WHERE id = $1 AND novel_id = $2)",
        )
        .bind(chapter_id)
        .bind(novel_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_counter_drift(&self, kind: EntityKind) -> Result<Vec<CounterDrift>, AppError> {
        let target = kind.target();

        let rows = sqlx::query_as::<_, (i64, i32, i64)>(&drift_sql(&target))
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(entity_id, stored, actual)| CounterDrift {
                kind,
                entity_id,
                stored,
                actual,
            })
            .collect())
    }

    async fn repair_counters(&self, kind: EntityKind) -> Result<u64, AppError> {
        let target = kind.target();
        let mut tx = self.pool.begin().await?;

        // Waits out in-flight toggles so the recount sees only committed relations.
        sqlx::query(&format!(
            "SELECT id FROM {} ORDER BY id FOR UPDATE",
            target.entity_table
        ))
        .execute(&mut *tx)
        .await?;

        let fixed = sqlx::query(&repair_sql(&target))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if fixed > 0 {
            tracing::warn!(kind = %kind, fixed, "Repaired drifted like counters");
        }

        Ok(fixed)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
