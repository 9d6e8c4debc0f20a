//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgLikeRepository`] - Like toggling, status reads and counter repair
//! - [`PgUserRepository`] - User bootstrap and lookup

pub mod pg_like_repository;
pub mod pg_user_repository;

pub use pg_like_repository::PgLikeRepository;
pub use pg_user_repository::PgUserRepository;
