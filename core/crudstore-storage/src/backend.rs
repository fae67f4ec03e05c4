//! Backend abstraction.
//!
//! The HTTP layer talks to storage only through [`ResourceBackend`], so the
//! in-memory [`ResourceStore`](crate::ResourceStore) can be replaced by a
//! durable implementation without touching callers. Any implementation must
//! keep the same inputs, error kinds and atomicity guarantees.

use crate::error::StoreResult;
use async_trait::async_trait;
use crudstore_model::{Entity, Fields};
use crudstore_types::{Deadline, EntityId};

/// CRUD over entities identified by a store-assigned [`EntityId`].
#[async_trait]
pub trait ResourceBackend: Send + Sync {
    /// Stores `fields` under the next id in the sequence.
    async fn create(&self, fields: Fields, deadline: Deadline) -> StoreResult<Entity>;

    /// Returns a copy of the entity with the given id.
    async fn get(&self, id: EntityId, deadline: Deadline) -> StoreResult<Entity>;

    /// Returns copies of all entities. Order is not part of the contract.
    async fn list(&self, deadline: Deadline) -> StoreResult<Vec<Entity>>;

    /// Replaces the fields of an existing entity wholesale.
    async fn update(&self, id: EntityId, fields: Fields, deadline: Deadline)
    -> StoreResult<Entity>;

    /// Removes an entity. Its id is never handed out again.
    async fn delete(&self, id: EntityId, deadline: Deadline) -> StoreResult<()>;

    /// Number of stored entities, for health reporting.
    async fn count(&self) -> usize;
}
