//! In-process backing store.
//!
//! Used by the test suites and by `DATABASE_URL=memory://` for local runs
//! without MySQL. A unit of work holds the store lock for its whole life and
//! edits a private copy of the tables; commit swaps the copy in, rollback
//! (or drop) throws it away. Units are therefore serialized, which is the
//! strictest isolation MySQL would give us.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core::pagination::{Page, PageParams};
use crate::core::traits::EntityId;
use crate::core::{AppError, Result};
use crate::modules::items::models::Item;
use crate::modules::items::repositories::{InMemoryItemRepository, ItemRepository};
use crate::modules::users::models::User;
use crate::modules::users::repositories::{InMemoryUserRepository, UserRepository};

use super::{UnitOfWork, UnitOfWorkFactory};

/// Columns every stored row carries
pub trait StoredEntity: Clone + Send + Sync + 'static {
    fn id(&self) -> EntityId;
    fn is_deleted(&self) -> bool;
    fn mark_deleted(&mut self, at: NaiveDateTime);
}

impl StoredEntity for User {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self, at: NaiveDateTime) {
        self.is_deleted = true;
        self.update_date = Some(at);
    }
}

impl StoredEntity for Item {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self, at: NaiveDateTime) {
        self.is_deleted = true;
        self.update_date = Some(at);
    }
}

/// Rows keyed by ID with an auto-increment counter
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<EntityId, T>,
    last_id: EntityId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: StoredEntity> Table<T> {
    /// Next auto-increment value. IDs are never reused.
    pub fn allocate_id(&mut self) -> EntityId {
        self.last_id += 1;
        self.last_id
    }

    pub fn insert(&mut self, row: T) {
        self.rows.insert(row.id(), row);
    }

    /// Live row by ID
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.rows.get(&id).filter(|row| !row.is_deleted())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.rows.get_mut(&id).filter(|row| !row.is_deleted())
    }

    /// Whether a row exists at all, deleted or not
    pub fn contains(&self, id: EntityId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Live rows in ID order
    pub fn live(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.values().filter(|row| !row.is_deleted())
    }

    /// Every row including soft-deleted ones
    pub fn all_rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.values()
    }

    pub fn mark_deleted(&mut self, id: EntityId, at: NaiveDateTime) -> bool {
        match self.get_mut(id) {
            Some(row) => {
                row.mark_deleted(at);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub fn page(&self, params: PageParams) -> Page<T> {
        let total = self.live().count() as u64;
        let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.limit()).unwrap_or(usize::MAX);
        let items = self.live().skip(offset).take(limit).cloned().collect();
        Page::new(items, total, params)
    }
}

/// Full contents of the store
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub users: Table<User>,
    pub items: Table<Item>,
}

/// Shared handle to the in-process store
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    available: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Copy of the committed state
    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }

    /// Simulate the database going away; `begin` and `ping` fail while unavailable
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(AppError::DatabaseUnavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }

    /// Equivalent of `SELECT 1`
    pub async fn ping(&self) -> Result<i64> {
        self.ensure_available()?;
        Ok(1)
    }
}

#[async_trait]
impl UnitOfWorkFactory for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        self.ensure_available()?;

        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, working }))
    }
}

/// Unit of work over a private copy of the store
pub struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&mut self) -> Box<dyn UserRepository + '_> {
        let MemoryState { users, items } = &mut self.working;
        Box::new(InMemoryUserRepository::new(users, items))
    }

    fn items(&mut self) -> Box<dyn ItemRepository + '_> {
        let MemoryState { users, items } = &mut self.working;
        Box::new(InMemoryItemRepository::new(items, users))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
