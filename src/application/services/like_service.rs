//! Like toggling service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::{EntityKind, LikeState};
use crate::domain::repositories::LikeRepository;
use crate::error::AppError;

/// Retry and deadline settings for like operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TogglePolicy {
    /// Extra attempts after a conflicting first attempt.
    pub max_retries: usize,
    /// First backoff step; doubles on each retry, with jitter.
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Upper bound for one call including all of its retries.
    pub timeout: Duration,
}

impl Default for TogglePolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Service flipping like state and keeping `likes_count` consistent.
///
/// Each attempt is one store transaction. Attempts that abort with
/// [`AppError::Conflict`] are repeated as a whole; every other failure is
/// returned unchanged. Nothing is retried after a commit, so one call flips
/// the state at most once.
pub struct LikeService<R: LikeRepository> {
    repository: Arc<R>,
    policy: TogglePolicy,
}

impl<R: LikeRepository> LikeService<R> {
    pub fn new(repository: Arc<R>, policy: TogglePolicy) -> Self {
        Self { repository, policy }
    }

    /// Flips the user's like on an entity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for non-positive ids, before touching the store.
    /// Returns [`AppError::NotFound`] if the entity does not exist.
    /// Returns [`AppError::Conflict`] if every attempt lost a concurrent race.
    /// Returns [`AppError::Unavailable`] if the store is down or the deadline passed;
    /// in the latter case the open transaction is dropped and rolled back.
    pub async fn toggle_like(
        &self,
        kind: EntityKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError> {
        validate_id("entity_id", entity_id)?;
        validate_id("user_id", user_id)?;

        let result = self
            .with_deadline(self.toggle_with_retry(kind, entity_id, user_id))
            .await;

        match &result {
            Ok(state) => {
                let label = if state.is_liked { "liked" } else { "unliked" };
                metrics::counter!("likes_toggled_total", "kind" => kind.as_str(), "state" => label)
                    .increment(1);
                tracing::info!(
                    kind = %kind,
                    entity_id,
                    user_id,
                    likes_count = state.likes_count,
                    is_liked = state.is_liked,
                    "Like toggled"
                );
            }
            Err(e) => {
                metrics::counter!("likes_toggle_failures_total", "kind" => kind.as_str(), "code" => e.code())
                    .increment(1);
                tracing::warn!(kind = %kind, entity_id, user_id, error = %e, "Like toggle failed");
            }
        }

        result
    }

    /// Toggles a chapter like, checking the chapter belongs to `novel_id` first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the chapter is not part of the novel.
    /// See [`Self::toggle_like`] for the remaining cases.
    pub async fn toggle_chapter_like(
        &self,
        novel_id: i64,
        chapter_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError> {
        self.ensure_chapter_in_novel(novel_id, chapter_id).await?;
        self.toggle_like(EntityKind::Chapter, chapter_id, user_id).await
    }

    /// Reads the counter and the user's like flag without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for non-positive ids.
    /// Returns [`AppError::NotFound`] if the entity does not exist.
    pub async fn like_status(
        &self,
        kind: EntityKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError> {
        validate_id("entity_id", entity_id)?;
        validate_id("user_id", user_id)?;

        self.with_deadline(self.repository.status(kind, entity_id, user_id))
            .await
    }

    /// Like status of a chapter scoped to its novel.
    pub async fn chapter_like_status(
        &self,
        novel_id: i64,
        chapter_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError> {
        self.ensure_chapter_in_novel(novel_id, chapter_id).await?;
        self.like_status(EntityKind::Chapter, chapter_id, user_id).await
    }

    async fn ensure_chapter_in_novel(&self, novel_id: i64, chapter_id: i64) -> Result<(), AppError> {
        validate_id("novel_id", novel_id)?;
        validate_id("chapter_id", chapter_id)?;

        let belongs = self
            .with_deadline(self.repository.chapter_in_novel(novel_id, chapter_id))
            .await?;

        if !belongs {
            return Err(AppError::not_found(
                "Chapter not found",
                json!({ "novel_id": novel_id, "chapter_id": chapter_id }),
            ));
        }

        Ok(())
    }

    async fn toggle_with_retry(
        &self,
        kind: EntityKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError> {
        let base_ms = u64::try_from(self.policy.base_delay.as_millis()).unwrap_or(u64::MAX);
        // from_millis(2) with factor f yields 2f, 4f, 8f ... so the first wait is ~base.
        let strategy = ExponentialBackoff::from_millis(2)
            .factor((base_ms / 2).max(1))
            .max_delay(self.policy.max_delay)
            .map(jitter)
            .take(self.policy.max_retries);

        RetryIf::spawn(
            strategy,
            || self.repository.toggle(kind, entity_id, user_id),
            |e: &AppError| {
                let retry = e.is_retryable();
                if retry {
                    metrics::counter!("likes_toggle_retries_total", "kind" => kind.as_str())
                        .increment(1);
                    tracing::debug!(kind = %kind, entity_id, user_id, "Retrying like toggle after conflict");
                }
                retry
            },
        )
        .await
    }

    async fn with_deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.policy.timeout, fut)
            .await
            .map_err(|_| {
                AppError::unavailable(
                    "Like operation timed out",
                    json!({ "timeout_ms": self.policy.timeout.as_millis() as u64 }),
                )
            })?
    }
}

/// Rejects non-positive ids with [`AppError::Validation`].
///
/// Handlers call this for path ids before any write on behalf of the request.
pub fn validate_id(field: &'static str, value: i64) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::bad_request(
            format!("{field} must be a positive integer"),
            json!({ "field": field, "value": value }),
        ));
    }
    Ok(())
}
