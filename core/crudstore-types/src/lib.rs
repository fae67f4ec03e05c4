//! Core type definitions for crudstore.
//!
//! This crate defines the small, dependency-light types shared by the
//! store and its adapters:
//! - [`EntityId`] — the integer handle assigned by the store's sequence
//! - [`Deadline`] — the per-call time budget every store operation accepts
//!
//! Entity payloads and validation live in `crudstore-model`.

mod deadline;
mod ids;

pub use deadline::{Deadline, DeadlineExceeded};
pub use ids::EntityId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid entity id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
