//! The in-memory entity table.

use crate::backend::ResourceBackend;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use crudstore_model::{AcceptAll, Entity, FieldValidator, Fields};
use crudstore_types::{Deadline, EntityId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// How many entities `list` copies between deadline checks.
pub const DEFAULT_SCAN_BATCH: usize = 1024;

/// Table and id sequence, always accessed together under one lock.
#[derive(Debug)]
struct Table {
    entities: BTreeMap<EntityId, Fields>,
    next_id: Option<EntityId>,
}

impl Table {
    fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: Some(EntityId::FIRST),
        }
    }

    /// Takes the next id from the sequence. `None` once the id space is used up.
    fn allocate(&mut self) -> Option<EntityId> {
        let id = self.next_id?;
        self.next_id = id.next();
        Some(id)
    }
}

/// Concurrency-safe CRUD store over entities.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
/// Reads hand out independent copies, so callers can never mutate stored
/// state except through [`update`](Self::update).
pub struct ResourceStore {
    table: Mutex<Table>,
    validator: Arc<dyn FieldValidator>,
    scan_batch: usize,
}

impl ResourceStore {
    /// Creates an empty store that accepts any fields.
    pub fn new() -> Self {
        Self::with_validator(Arc::new(AcceptAll))
    }

    /// Creates an empty store that validates writes with `validator`.
    pub fn with_validator(validator: Arc<dyn FieldValidator>) -> Self {
        Self {
            table: Mutex::new(Table::new()),
            validator,
            scan_batch: DEFAULT_SCAN_BATCH,
        }
    }

    /// Sets how many entities `list` copies between deadline checks.
    #[must_use]
    pub fn with_scan_batch(mut self, scan_batch: usize) -> Self {
        self.scan_batch = scan_batch.max(1);
        self
    }

    /// Acquires the table, waiting no longer than `deadline` allows.
    ///
    /// The deadline is checked before waiting and again once the lock is
    /// held, so a caller whose budget ran out while queued never mutates.
    async fn lock(&self, deadline: Deadline) -> StoreResult<MutexGuard<'_, Table>> {
        deadline.check()?;
        let table = deadline.run(self.table.lock()).await?;
        deadline.check()?;
        Ok(table)
    }

    fn validate(&self, fields: &Fields) -> StoreResult<()> {
        self.validator
            .validate(fields)
            .map_err(StoreError::InvalidArgument)
    }

    /// Stores `fields` under the next id and returns the stored entity.
    pub async fn create(&self, fields: Fields, deadline: Deadline) -> StoreResult<Entity> {
        deadline.check()?;
        self.validate(&fields)?;

        let mut table = self.lock(deadline).await?;
        let id = table
            .allocate()
            .ok_or_else(|| StoreError::Internal("id sequence exhausted".into()))?;
        if table.entities.contains_key(&id) {
            warn!(%id, "sequence produced an id that is already stored");
            return Err(StoreError::Internal(format!("duplicate id {id}")));
        }
        table.entities.insert(id, fields.clone());
        drop(table);

        debug!(%id, "created entity");
        Ok(Entity::new(id, fields))
    }

    /// Returns a copy of the entity with the given id.
    pub async fn get(&self, id: EntityId, deadline: Deadline) -> StoreResult<Entity> {
        let table = self.lock(deadline).await?;
        table
            .entities
            .get(&id)
            .map(|fields| Entity::new(id, fields.clone()))
            .ok_or(StoreError::NotFound(id))
    }

    /// Returns copies of all entities.
    ///
    /// The deadline is re-checked every `scan_batch` entities; if it fires
    /// mid-scan the partial copy is discarded.
    pub async fn list(&self, deadline: Deadline) -> StoreResult<Vec<Entity>> {
        let table = self.lock(deadline).await?;
        let mut out = Vec::with_capacity(table.entities.len());
        for (n, (id, fields)) in table.entities.iter().enumerate() {
            if n > 0 && n % self.scan_batch == 0 {
                deadline.check()?;
            }
            out.push(Entity::new(*id, fields.clone()));
        }
        Ok(out)
    }

    /// Replaces the fields of an existing entity. No merge with the old fields.
    pub async fn update(
        &self,
        id: EntityId,
        fields: Fields,
        deadline: Deadline,
    ) -> StoreResult<Entity> {
        deadline.check()?;
        self.validate(&fields)?;

        let mut table = self.lock(deadline).await?;
        let slot = table.entities.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = fields.clone();
        drop(table);

        debug!(%id, "updated entity");
        Ok(Entity::new(id, fields))
    }

    /// Removes an entity. The id is retired, never reassigned.
    pub async fn delete(&self, id: EntityId, deadline: Deadline) -> StoreResult<()> {
        let mut table = self.lock(deadline).await?;
        table.entities.remove(&id).ok_or(StoreError::NotFound(id))?;
        drop(table);

        debug!(%id, "deleted entity");
        Ok(())
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.table.lock().await.entities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// The id the next successful create will receive, without consuming it.
    pub async fn peek_next_id(&self) -> Option<EntityId> {
        self.table.lock().await.next_id
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceBackend for ResourceStore {
    async fn create(&self, fields: Fields, deadline: Deadline) -> StoreResult<Entity> {
        ResourceStore::create(self, fields, deadline).await
    }

    async fn get(&self, id: EntityId, deadline: Deadline) -> StoreResult<Entity> {
        ResourceStore::get(self, id, deadline).await
    }

    async fn list(&self, deadline: Deadline) -> StoreResult<Vec<Entity>> {
        ResourceStore::list(self, deadline).await
    }

    async fn update(
        &self,
        id: EntityId,
        fields: Fields,
        deadline: Deadline,
    ) -> StoreResult<Entity> {
        ResourceStore::update(self, id, fields, deadline).await
    }

    async fn delete(&self, id: EntityId, deadline: Deadline) -> StoreResult<()> {
        ResourceStore::delete(self, id, deadline).await
    }

    async fn count(&self) -> usize {
        self.len().await
    }
}
