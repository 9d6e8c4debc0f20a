//! Core domain entities.
//!
//! - [`EntityKind`] / [`LikeTarget`] - what can be liked and where it is stored
//! - [`LikeState`] - committed like count and the caller's like flag
//! - [`CounterDrift`] - a counter that disagrees with its relation rows
//! - [`User`] / [`NewUser`] - platform users

pub mod like;
pub mod user;

pub use like::{CounterDrift, EntityKind, LikeState, LikeTarget, UnknownEntityKind};
pub use user::{NewUser, User};
