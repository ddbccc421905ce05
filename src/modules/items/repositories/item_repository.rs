use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlConnection;

use crate::core::pagination::{Page, PageParams};
use crate::core::traits::{EntityId, Repository};
use crate::core::{AppError, Result};
use crate::modules::items::models::{Item, NewItem};
use crate::unit_of_work::mysql::{delete_ids, inserted_id, soft_delete_ids};

/// Item persistence on top of the generic repository contract
#[async_trait]
pub trait ItemRepository: Repository<Item, NewItem> {
    /// Live items owned by a user, ordered by ID
    async fn find_by_owner(&mut self, owner_id: EntityId) -> Result<Vec<Item>>;

    /// Live items in a category, ordered by ID
    async fn find_by_category(&mut self, category: &str) -> Result<Vec<Item>>;

    /// Set the stock level; `None` when there is no live item with this ID
    async fn update_stock(&mut self, id: EntityId, quantity: i32) -> Result<Option<Item>>;
}

pub(crate) fn unknown_owner(owner_id: Option<EntityId>) -> String {
    match owner_id {
        Some(id) => format!("Owner with id {} does not exist", id),
        None => "Owner does not exist".to_string(),
    }
}

fn item_not_found(id: EntityId) -> AppError {
    AppError::not_found(format!("Item with id {} not found", id))
}

/// MySQL item repository bound to one transaction
pub struct MySqlItemRepository<'c> {
    conn: &'c mut MySqlConnection,
}

impl<'c> MySqlItemRepository<'c> {
    pub fn new(conn: &'c mut MySqlConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Item, NewItem> for MySqlItemRepository<'_> {
    async fn find_by_id(&mut self, id: EntityId) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, price, category, is_active, stock, owner_id,
                   create_date, update_date, is_deleted
            FROM items
            WHERE id = ? AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(item)
    }

    async fn find_all(&mut self) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, price, category, is_active, stock, owner_id,
                   create_date, update_date, is_deleted
            FROM items
            WHERE is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    async fn add(&mut self, item: NewItem) -> Result<Item> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO items (
                title, description, price, category, is_active, stock, owner_id,
                create_date, is_deleted
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(item.is_active)
        .bind(item.stock)
        .bind(item.owner_id)
        .bind(now)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| AppError::from_write(e, unknown_owner(item.owner_id)))?;

        Ok(Item {
            id: inserted_id(result.last_insert_id())?,
            title: item.title,
            description: item.description,
            price: item.price,
            category: item.category,
            is_active: item.is_active,
            stock: item.stock,
            owner_id: item.owner_id,
            create_date: now,
            update_date: None,
            is_deleted: false,
        })
    }

    async fn update(&mut self, mut item: Item) -> Result<Item> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE items
            SET title = ?, description = ?, price = ?, category = ?, is_active = ?,
                stock = ?, owner_id = ?, update_date = ?
            WHERE id = ? AND is_deleted = FALSE
            "#,
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(item.is_active)
        .bind(item.stock)
        .bind(item.owner_id)
        .bind(now)
        .bind(item.id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| AppError::from_write(e, unknown_owner(item.owner_id)))?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(item.id));
        }

        item.update_date = Some(now);
        Ok(item)
    }

    async fn soft_delete(&mut self, id: EntityId) -> Result<()> {
        let result = sqlx::query(
            "UPDATE items SET is_deleted = TRUE, update_date = ? WHERE id = ? AND is_deleted = FALSE",
        )
        .bind(Utc::now().naive_utc())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(id));
        }
        Ok(())
    }

    async fn soft_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        soft_delete_ids(&mut *self.conn, "items", ids, Utc::now().naive_utc()).await
    }

    async fn permanent_delete(&mut self, id: EntityId) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(id));
        }
        Ok(())
    }

    async fn permanent_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        delete_ids(&mut *self.conn, "items", ids).await
    }

    async fn paginate(&mut self, params: PageParams) -> Result<Page<Item>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE is_deleted = FALSE")
                .fetch_one(&mut *self.conn)
                .await?;

        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, price, category, is_active, stock, owner_id,
                   create_date, update_date, is_deleted
            FROM items
            WHERE is_deleted = FALSE
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(Page::new(items, total.max(0) as u64, params))
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository<'_> {
    async fn find_by_owner(&mut self, owner_id: EntityId) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, price, category, is_active, stock, owner_id,
                   create_date, update_date, is_deleted
            FROM items
            WHERE owner_id = ? AND is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    async fn find_by_category(&mut self, category: &str) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, price, category, is_active, stock, owner_id,
                   create_date, update_date, is_deleted
            FROM items
            WHERE category = ? AND is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    async fn update_stock(&mut self, id: EntityId, quantity: i32) -> Result<Option<Item>> {
        let Some(mut item) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        item.stock = quantity;
        self.update(item).await.map(Some)
    }
}
