//! In-memory resource store for crudstore.
//!
//! Provides a concurrency-safe, deadline-aware table of entities keyed by a
//! sequentially assigned [`EntityId`](crudstore_types::EntityId).
//!
//! # Architecture
//!
//! - A single lock guards the table and the id sequence jointly, so every
//!   operation is linearizable with respect to the others
//! - Every operation takes a [`Deadline`](crudstore_types::Deadline): it is
//!   checked at entry, bounds the wait for the lock, and is re-checked before
//!   any mutation
//! - Validation runs through a pluggable
//!   [`FieldValidator`](crudstore_model::FieldValidator) before the lock is taken
//! - [`ResourceBackend`] is the seam adapters depend on

mod backend;
mod error;
mod store;

pub use backend::ResourceBackend;
pub use error::{StoreError, StoreResult};
pub use store::{ResourceStore, DEFAULT_SCAN_BATCH};
