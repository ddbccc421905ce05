use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder, Transaction};

use crate::core::traits::EntityId;
use crate::core::{AppError, Result};
use crate::modules::items::repositories::{ItemRepository, MySqlItemRepository};
use crate::modules::users::repositories::{MySqlUserRepository, UserRepository};

use super::{UnitOfWork, UnitOfWorkFactory};

/// Begins MySQL transactions from a shared pool
#[derive(Clone)]
pub struct MySqlUnitOfWorkFactory {
    pool: MySqlPool,
}

impl MySqlUnitOfWorkFactory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for MySqlUnitOfWorkFactory {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseUnavailable(e.to_string()))?;

        Ok(Box::new(MySqlUnitOfWork { tx }))
    }
}

/// Unit of work over one MySQL transaction.
/// sqlx rolls the transaction back if this is dropped uncommitted.
pub struct MySqlUnitOfWork {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl UnitOfWork for MySqlUnitOfWork {
    fn users(&mut self) -> Box<dyn UserRepository + '_> {
        Box::new(MySqlUserRepository::new(&mut self.tx))
    }

    fn items(&mut self) -> Box<dyn ItemRepository + '_> {
        Box::new(MySqlItemRepository::new(&mut self.tx))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to roll back transaction: {}", e)))
    }
}

/// `UPDATE <table> SET is_deleted = TRUE ... WHERE id IN (...)`
pub(crate) async fn soft_delete_ids(
    conn: &mut MySqlConnection,
    table: &'static str,
    ids: &[EntityId],
    at: NaiveDateTime,
) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
        "UPDATE {} SET is_deleted = TRUE, update_date = ",
        table
    ));
    builder.push_bind(at);
    builder.push(" WHERE is_deleted = FALSE AND id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    builder.build().execute(conn).await?;
    Ok(())
}

/// `DELETE FROM <table> WHERE id IN (...)`
pub(crate) async fn delete_ids(
    conn: &mut MySqlConnection,
    table: &'static str,
    ids: &[EntityId],
) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<MySql> =
        QueryBuilder::new(format!("DELETE FROM {} WHERE id IN (", table));
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    builder
        .build()
        .execute(conn)
        .await
        .map_err(|e| AppError::from_write(e, format!("Rows in {} are still referenced", table)))?;
    Ok(())
}

/// Convert a MySQL `LAST_INSERT_ID()` into an entity ID
pub(crate) fn inserted_id(last_insert_id: u64) -> Result<EntityId> {
    EntityId::try_from(last_insert_id)
        .map_err(|_| AppError::internal(format!("Insert id {} out of range", last_insert_id)))
}
