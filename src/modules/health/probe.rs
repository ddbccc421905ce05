use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::unit_of_work::MemoryStore;

/// Round-trip check against the backing store
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Run `SELECT 1` and return the scalar
    async fn ping(&self) -> Result<i64>;
}

#[async_trait]
impl DatabaseProbe for MySqlPool {
    async fn ping(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(self)
            .await
            .map_err(|e| AppError::DatabaseUnavailable(e.to_string()))
    }
}

#[async_trait]
impl DatabaseProbe for MemoryStore {
    async fn ping(&self) -> Result<i64> {
        MemoryStore::ping(self).await
    }
}
