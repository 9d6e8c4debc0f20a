//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by
//! `crate::infrastructure::persistence`; the business rules built on them
//! live in [`crate::application::services`].
//!
//! # Like Toggle Flow
//!
//! 1. HTTP handler resolves the user and the entity from the request path
//! 2. [`crate::application::services::LikeService`] validates ids and drives retries
//! 3. [`repositories::LikeRepository::toggle`] flips the relation and moves the
//!    counter by exactly one inside a single transaction

pub mod entities;
pub mod repositories;
