//! Unit of work: one transaction, every repository bound to it.
//!
//! Services open a unit per operation with [`UnitOfWorkFactory::begin`], run
//! repository calls through [`UnitOfWork::users`] / [`UnitOfWork::items`],
//! then hand the outcome to [`complete`], which commits on `Ok` and rolls
//! back on `Err`. A unit dropped without either is rolled back.

use async_trait::async_trait;

use crate::core::Result;
use crate::modules::items::repositories::ItemRepository;
use crate::modules::users::repositories::UserRepository;

pub mod memory;
pub mod mysql;

pub use memory::{MemoryState, MemoryStore, StoredEntity, Table};
pub use mysql::MySqlUnitOfWorkFactory;

#[async_trait]
pub trait UnitOfWork: Send {
    /// User repository bound to this unit's transaction
    fn users(&mut self) -> Box<dyn UserRepository + '_>;

    /// Item repository bound to this unit's transaction
    fn items(&mut self) -> Box<dyn ItemRepository + '_>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Opens units of work against one backing store
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}

/// Commit `uow` if `result` is `Ok`, roll it back otherwise.
///
/// The caller's result is returned unchanged, except that a failed commit
/// replaces a successful result with the commit error. A failed rollback is
/// logged and the original error wins.
pub async fn complete<T>(uow: Box<dyn UnitOfWork>, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                tracing::error!("Rollback failed after '{}': {}", err, rollback_err);
            }
            Err(err)
        }
    }
}
