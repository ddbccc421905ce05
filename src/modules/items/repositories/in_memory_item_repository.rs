use async_trait::async_trait;
use chrono::Utc;

use crate::core::pagination::{Page, PageParams};
use crate::core::traits::{EntityId, Repository};
use crate::core::{AppError, Result};
use crate::modules::items::models::{Item, NewItem};
use crate::modules::users::models::User;
use crate::unit_of_work::Table;

use super::item_repository::{unknown_owner, ItemRepository};

/// Item repository over the in-process store.
/// `owner_id` must reference an existing user row, as the MySQL foreign key requires.
pub struct InMemoryItemRepository<'a> {
    items: &'a mut Table<Item>,
    users: &'a Table<User>,
}

impl<'a> InMemoryItemRepository<'a> {
    pub fn new(items: &'a mut Table<Item>, users: &'a Table<User>) -> Self {
        Self { items, users }
    }

    fn check_owner(&self, owner_id: Option<EntityId>) -> Result<()> {
        match owner_id {
            Some(id) if !self.users.contains(id) => {
                Err(AppError::conflict(unknown_owner(owner_id)))
            }
            _ => Ok(()),
        }
    }
}

fn item_not_found(id: EntityId) -> AppError {
    AppError::not_found(format!("Item with id {} not found", id))
}

#[async_trait]
impl Repository<Item, NewItem> for InMemoryItemRepository<'_> {
    async fn find_by_id(&mut self, id: EntityId) -> Result<Option<Item>> {
        Ok(self.items.get(id).cloned())
    }

    async fn find_all(&mut self) -> Result<Vec<Item>> {
        Ok(self.items.live().cloned().collect())
    }

    async fn add(&mut self, item: NewItem) -> Result<Item> {
        self.check_owner(item.owner_id)?;

        let created = Item {
            id: self.items.allocate_id(),
            title: item.title,
            description: item.description,
            price: item.price,
            category: item.category,
            is_active: item.is_active,
            stock: item.stock,
            owner_id: item.owner_id,
            create_date: Utc::now().naive_utc(),
            update_date: None,
            is_deleted: false,
        };
        self.items.insert(created.clone());
        Ok(created)
    }

    async fn update(&mut self, mut item: Item) -> Result<Item> {
        if self.items.get(item.id).is_none() {
            return Err(item_not_found(item.id));
        }
        self.check_owner(item.owner_id)?;

        item.update_date = Some(Utc::now().naive_utc());
        item.is_deleted = false;
        self.items.insert(item.clone());
        Ok(item)
    }

    async fn soft_delete(&mut self, id: EntityId) -> Result<()> {
        if self.items.mark_deleted(id, Utc::now().naive_utc()) {
            Ok(())
        } else {
            Err(item_not_found(id))
        }
    }

    async fn soft_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        let now = Utc::now().naive_utc();
        for id in ids {
            self.items.mark_deleted(*id, now);
        }
        Ok(())
    }

    async fn permanent_delete(&mut self, id: EntityId) -> Result<()> {
        if self.items.remove(id) {
            Ok(())
        } else {
            Err(item_not_found(id))
        }
    }

    async fn permanent_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        for id in ids {
            self.items.remove(*id);
        }
        Ok(())
    }

    async fn paginate(&mut self, params: PageParams) -> Result<Page<Item>> {
        Ok(self.items.page(params))
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository<'_> {
    async fn find_by_owner(&mut self, owner_id: EntityId) -> Result<Vec<Item>> {
        Ok(self
            .items
            .live()
            .filter(|i| i.owner_id == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn find_by_category(&mut self, category: &str) -> Result<Vec<Item>> {
        Ok(self
            .items
            .live()
            .filter(|i| i.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn update_stock(&mut self, id: EntityId, quantity: i32) -> Result<Option<Item>> {
        let Some(item) = self.items.get_mut(id) else {
            return Ok(None);
        };
        item.stock = quantity;
        item.update_date = Some(Utc::now().naive_utc());
        Ok(Some(item.clone()))
    }
}
