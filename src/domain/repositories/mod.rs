//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. Concrete implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LikeRepository`] - Like toggling, like status and counter audits
//! - [`UserRepository`] - User bootstrap and lookup
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod like_repository;
pub mod user_repository;

pub use like_repository::LikeRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use like_repository::MockLikeRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
