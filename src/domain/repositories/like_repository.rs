//! Repository trait for like relations and their denormalized counters.

use crate::domain::entities::{CounterDrift, EntityKind, LikeState};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface owning every write to `likes_count`.
///
/// No other code path may update the counter columns; they move only in
/// lockstep with relation rows inside the transactions run here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLikeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_like.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Flips the user's like on an entity and adjusts the counter by one, atomically.
    ///
    /// Runs as a single transaction holding a row lock on the entity. Dropping
    /// the returned future before it completes rolls the transaction back.
    ///
    /// # Returns
    ///
    /// The counter value and like flag as committed by this call.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entity (or the user) does not exist.
    /// Returns [`AppError::Conflict`] on serialization failures, deadlocks or
    /// unique-key races; the call can be repeated as a whole.
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn toggle(
        &self,
        kind: EntityKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError>;

    /// Reads the current counter and whether the user likes the entity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entity does not exist.
    async fn status(
        &self,
        kind: EntityKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<LikeState, AppError>;

    /// Whether the chapter exists and belongs to the novel.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn chapter_in_novel(&self, novel_id: i64, chapter_id: i64) -> Result<bool, AppError>;

    /// Lists entities whose counter differs from their relation row count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_counter_drift(&self, kind: EntityKind) -> Result<Vec<CounterDrift>, AppError>;

    /// Resets drifted counters to their relation row count.
    ///
    /// # Returns
    ///
    /// The number of rows corrected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn repair_counters(&self, kind: EntityKind) -> Result<u64, AppError>;
}
