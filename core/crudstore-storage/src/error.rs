//! Error types for the storage layer.

use crudstore_types::{DeadlineExceeded, EntityId};
use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in storage operations.
///
/// None of these leave the store unusable; callers decide how to present
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    /// Supplied fields were rejected by the validator.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller's deadline elapsed before the operation could run.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Only a missed deadline is worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DeadlineExceeded)
    }
}

impl From<DeadlineExceeded> for StoreError {
    fn from(_: DeadlineExceeded) -> Self {
        Self::DeadlineExceeded
    }
}
