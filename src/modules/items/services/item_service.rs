use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::pagination::{Page, PageParams};
use crate::core::traits::{EntityId, Repository};
use crate::core::{AppError, Result};
use crate::modules::items::models::{normalize_category, Item, ItemRequest};
use crate::modules::items::repositories::ItemRepository;
use crate::modules::users::repositories::UserRepository;
use crate::unit_of_work::{complete, UnitOfWork, UnitOfWorkFactory};

use super::pricing;

/// Item business rules. Owner bookkeeping (`items_count`) happens in the
/// same unit of work as the item write.
#[derive(Clone)]
pub struct ItemService {
    uow: Arc<dyn UnitOfWorkFactory>,
}

fn item_not_found(id: EntityId) -> AppError {
    AppError::not_found(format!("Item with id {} not found", id))
}

impl ItemService {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow }
    }

    async fn load(uow: &mut dyn UnitOfWork, id: EntityId) -> Result<Item> {
        uow.items()
            .find_by_id(id)
            .await?
            .ok_or_else(|| item_not_found(id))
    }

    async fn require_owner(uow: &mut dyn UnitOfWork, owner_id: EntityId) -> Result<()> {
        match uow.users().find_by_id(owner_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "Owner with id {} not found",
                owner_id
            ))),
        }
    }

    /// Adjust the owner's counter if the owner is still live
    async fn recount_owner(uow: &mut dyn UnitOfWork, owner_id: EntityId, delta: i32) -> Result<()> {
        if uow.users().find_by_id(owner_id).await?.is_some() {
            uow.users().adjust_items_count(owner_id, delta).await?;
        }
        Ok(())
    }

    pub async fn get(&self, id: EntityId) -> Result<Item> {
        tracing::debug!(item_id = id, "Fetching item");

        let mut uow = self.uow.begin().await?;
        let result = Self::load(&mut *uow, id).await;
        complete(uow, result).await
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<Item>> {
        params.validate()?;

        let mut uow = self.uow.begin().await?;
        let result = uow.items().paginate(params).await;
        complete(uow, result).await
    }

    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Item>> {
        tracing::debug!(category, "Fetching items by category");
        let Some(category) = normalize_category(Some(category.to_string())) else {
            return Ok(Vec::new());
        };

        let mut uow = self.uow.begin().await?;
        let result = uow.items().find_by_category(&category).await;
        complete(uow, result).await
    }

    pub async fn get_by_owner(&self, owner_id: EntityId) -> Result<Vec<Item>> {
        let mut uow = self.uow.begin().await?;
        let result = async {
            Self::require_owner(&mut *uow, owner_id).await?;
            uow.items().find_by_owner(owner_id).await
        }
        .await;
        complete(uow, result).await
    }

    pub async fn create(&self, request: ItemRequest) -> Result<Item> {
        let new_item = request.validated()?.into_new_item();

        let mut uow = self.uow.begin().await?;
        let result = async {
            if let Some(owner_id) = new_item.owner_id {
                Self::require_owner(&mut *uow, owner_id).await?;
            }

            let item = uow.items().add(new_item).await?;
            if let Some(owner_id) = item.owner_id {
                uow.users().adjust_items_count(owner_id, 1).await?;
            }
            Ok::<_, AppError>(item)
        }
        .await;
        let item = complete(uow, result).await?;

        tracing::info!(item_id = item.id, owner_id = ?item.owner_id, "Item created");
        Ok(item)
    }

    /// Replace every mutable field of an item
    pub async fn update(&self, id: EntityId, request: ItemRequest) -> Result<Item> {
        let request = request.validated()?;

        let mut uow = self.uow.begin().await?;
        let result = async {
            let existing = Self::load(&mut *uow, id).await?;
            let previous_owner = existing.owner_id;

            if let Some(owner_id) = request.owner_id {
                Self::require_owner(&mut *uow, owner_id).await?;
            }

            let item = uow
                .items()
                .update(Item {
                    title: request.title,
                    description: request.description,
                    price: request.price,
                    category: request.category,
                    is_active: request.is_active,
                    stock: request.stock,
                    owner_id: request.owner_id,
                    ..existing
                })
                .await?;

            if previous_owner != item.owner_id {
                if let Some(old_owner) = previous_owner {
                    Self::recount_owner(&mut *uow, old_owner, -1).await?;
                }
                if let Some(new_owner) = item.owner_id {
                    uow.users().adjust_items_count(new_owner, 1).await?;
                }
            }
            Ok::<_, AppError>(item)
        }
        .await;
        let item = complete(uow, result).await?;

        tracing::info!(item_id = item.id, "Item updated");
        Ok(item)
    }

    /// Set the stock level. Returns the level before the change and the updated item.
    pub async fn update_stock(&self, id: EntityId, quantity: i32) -> Result<(i32, Item)> {
        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than 0"));
        }

        let mut uow = self.uow.begin().await?;
        let result = async {
            let previous = Self::load(&mut *uow, id).await?.stock;
            let item = uow
                .items()
                .update_stock(id, quantity)
                .await?
                .ok_or_else(|| item_not_found(id))?;
            Ok::<_, AppError>((previous, item))
        }
        .await;
        let (previous, item) = complete(uow, result).await?;

        tracing::info!(item_id = id, previous, stock = item.stock, "Item stock updated");
        Ok((previous, item))
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let mut uow = self.uow.begin().await?;
        let result = async {
            let item = Self::load(&mut *uow, id).await?;
            uow.items().soft_delete(id).await?;
            if let Some(owner_id) = item.owner_id {
                Self::recount_owner(&mut *uow, owner_id, -1).await?;
            }
            Ok::<_, AppError>(())
        }
        .await;
        complete(uow, result).await?;

        tracing::info!(item_id = id, "Item deleted");
        Ok(())
    }

    pub fn calculate_total_value(&self, price: Decimal, quantity: i64) -> Result<Decimal> {
        pricing::total_value(price, quantity)
    }

    pub fn calculate_discount(&self, price: Decimal, percentage: Decimal) -> Result<Decimal> {
        pricing::discounted_price(price, percentage)
    }

    /// Stored item plus the value of `quantity` units of it
    pub async fn item_value(&self, id: EntityId, quantity: i64) -> Result<(Item, Decimal)> {
        let item = self.get(id).await?;
        let total = pricing::total_value(item.price, quantity)?;
        Ok((item, total))
    }

    /// Stored item plus its discounted price.
    /// Only proper discounts are accepted here: `0 < percentage < 100`.
    pub async fn item_discount(&self, id: EntityId, percentage: Decimal) -> Result<(Item, Decimal)> {
        if percentage <= Decimal::ZERO || percentage >= Decimal::ONE_HUNDRED {
            return Err(AppError::validation(
                "Discount percentage must be between 0 and 100 (exclusive)",
            ));
        }

        let item = self.get(id).await?;
        let final_price = pricing::discounted_price(item.price, percentage)?;
        Ok((item, final_price))
    }
}
