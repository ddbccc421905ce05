use async_trait::async_trait;

use crate::core::pagination::{Page, PageParams};
use crate::core::Result;

/// Row identity shared by every persisted entity
pub type EntityId = i64;

/// Base repository trait for CRUD operations.
///
/// Repositories are bound to one unit of work, so every method takes
/// `&mut self`: reads and writes go through the same transaction. Rows with
/// `is_deleted` set are never returned by reads.
#[async_trait]
pub trait Repository<T, N>: Send
where
    T: Send + 'static,
    N: Send + 'static,
{
    /// Find a live entity by ID
    async fn find_by_id(&mut self, id: EntityId) -> Result<Option<T>>;

    /// All live entities ordered by ID
    async fn find_all(&mut self) -> Result<Vec<T>>;

    /// Insert a new entity and return it with its generated ID
    async fn add(&mut self, entity: N) -> Result<T>;

    /// Insert several entities in order
    async fn add_range(&mut self, entities: Vec<N>) -> Result<Vec<T>> {
        let mut created = Vec::with_capacity(entities.len());
        for entity in entities {
            created.push(self.add(entity).await?);
        }
        Ok(created)
    }

    /// Persist all mutable columns of an existing entity and stamp `update_date`.
    /// Fails with `NotFound` if the row is missing or soft-deleted.
    async fn update(&mut self, entity: T) -> Result<T>;

    /// Mark an entity deleted. Fails with `NotFound` if there is no live row.
    async fn soft_delete(&mut self, id: EntityId) -> Result<()>;

    /// Mark several entities deleted; missing IDs are skipped
    async fn soft_delete_range(&mut self, ids: &[EntityId]) -> Result<()>;

    /// Remove the row for good. Fails with `NotFound` if there is no row.
    async fn permanent_delete(&mut self, id: EntityId) -> Result<()>;

    /// Remove several rows for good; missing IDs are skipped
    async fn permanent_delete_range(&mut self, ids: &[EntityId]) -> Result<()>;

    /// One page of live entities ordered by ID
    async fn paginate(&mut self, params: PageParams) -> Result<Page<T>>;
}
