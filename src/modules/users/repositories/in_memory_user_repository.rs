use async_trait::async_trait;
use chrono::Utc;

use crate::core::pagination::{Page, PageParams};
use crate::core::traits::{EntityId, Repository};
use crate::core::{AppError, Result};
use crate::modules::items::models::Item;
use crate::modules::users::models::{NewUser, User};
use crate::unit_of_work::Table;

use super::user_repository::{duplicate_email, UserRepository};

/// User repository over the in-process store.
///
/// Mirrors the MySQL schema: `email` is unique over every row, soft-deleted
/// ones included, and a user still referenced by an item cannot be removed.
pub struct InMemoryUserRepository<'a> {
    users: &'a mut Table<User>,
    items: &'a Table<Item>,
}

impl<'a> InMemoryUserRepository<'a> {
    pub fn new(users: &'a mut Table<User>, items: &'a Table<Item>) -> Self {
        Self { users, items }
    }

    fn email_taken(&self, email: &str, except: Option<EntityId>) -> bool {
        self.users
            .all_rows()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn is_referenced(&self, id: EntityId) -> bool {
        self.items.all_rows().any(|i| i.owner_id == Some(id))
    }
}

fn user_not_found(id: EntityId) -> AppError {
    AppError::not_found(format!("User with id {} not found", id))
}

#[async_trait]
impl Repository<User, NewUser> for InMemoryUserRepository<'_> {
    async fn find_by_id(&mut self, id: EntityId) -> Result<Option<User>> {
        Ok(self.users.get(id).cloned())
    }

    async fn find_all(&mut self) -> Result<Vec<User>> {
        Ok(self.users.live().cloned().collect())
    }

    async fn add(&mut self, user: NewUser) -> Result<User> {
        if self.email_taken(&user.email, None) {
            return Err(AppError::conflict(duplicate_email(&user.email)));
        }

        let created = User {
            id: self.users.allocate_id(),
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            items_count: 0,
            create_date: Utc::now().naive_utc(),
            update_date: None,
            is_deleted: false,
        };
        self.users.insert(created.clone());
        Ok(created)
    }

    async fn update(&mut self, mut user: User) -> Result<User> {
        if self.users.get(user.id).is_none() {
            return Err(user_not_found(user.id));
        }
        if self.email_taken(&user.email, Some(user.id)) {
            return Err(AppError::conflict(duplicate_email(&user.email)));
        }

        user.update_date = Some(Utc::now().naive_utc());
        user.is_deleted = false;
        self.users.insert(user.clone());
        Ok(user)
    }

    async fn soft_delete(&mut self, id: EntityId) -> Result<()> {
        if self.users.mark_deleted(id, Utc::now().naive_utc()) {
            Ok(())
        } else {
            Err(user_not_found(id))
        }
    }

    async fn soft_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        let now = Utc::now().naive_utc();
        for id in ids {
            self.users.mark_deleted(*id, now);
        }
        Ok(())
    }

    async fn permanent_delete(&mut self, id: EntityId) -> Result<()> {
        if !self.users.contains(id) {
            return Err(user_not_found(id));
        }
        if self.is_referenced(id) {
            return Err(AppError::conflict(format!(
                "User with id {} still owns items",
                id
            )));
        }
        self.users.remove(id);
        Ok(())
    }

    async fn permanent_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        if let Some(id) = ids.iter().find(|id| self.is_referenced(**id)) {
            return Err(AppError::conflict(format!(
                "User with id {} still owns items",
                id
            )));
        }
        for id in ids {
            self.users.remove(*id);
        }
        Ok(())
    }

    async fn paginate(&mut self, params: PageParams) -> Result<Page<User>> {
        Ok(self.users.page(params))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository<'_> {
    async fn find_by_email(&mut self, email: &str) -> Result<Option<User>> {
        Ok(self.users.live().find(|u| u.email == email).cloned())
    }

    async fn find_active(&mut self) -> Result<Vec<User>> {
        Ok(self.users.live().filter(|u| u.is_active).cloned().collect())
    }

    async fn adjust_items_count(&mut self, id: EntityId, delta: i32) -> Result<()> {
        let user = self.users.get_mut(id).ok_or_else(|| user_not_found(id))?;
        user.items_count = user.items_count.saturating_add(delta).max(0);
        user.update_date = Some(Utc::now().naive_utc());
        Ok(())
    }
}
