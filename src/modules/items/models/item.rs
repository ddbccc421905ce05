use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::traits::EntityId;
use crate::core::{AppError, Result};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 200;
pub const MAX_CATEGORY_LEN: usize = 100;
/// Largest value `items.price` (`DECIMAL(12, 2)`) can hold
pub const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2); // 9999999999.99

/// Item row as stored in `items`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Item {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_active: bool,
    pub stock: i32,
    pub owner_id: Option<EntityId>,
    pub create_date: NaiveDateTime,
    pub update_date: Option<NaiveDateTime>,
    pub is_deleted: bool,
}

/// Values for inserting an item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_active: bool,
    pub stock: i32,
    pub owner_id: Option<EntityId>,
}

/// Body of `POST /items` and `PUT /items/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub owner_id: Option<EntityId>,
}

fn default_active() -> bool {
    true
}

impl ItemRequest {
    /// Trim and check the fields; returns the normalized request
    pub fn validated(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::validation("Title must not be empty"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::validation(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }

        let description = normalize_optional(self.description);
        if let Some(description) = &description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(AppError::validation(format!(
                    "Description must be at most {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }

        let category = normalize_category(self.category);
        if let Some(category) = &category {
            if category.chars().count() > MAX_CATEGORY_LEN {
                return Err(AppError::validation(format!(
                    "Category must be at most {} characters",
                    MAX_CATEGORY_LEN
                )));
            }
        }

        if self.price < Decimal::ZERO {
            return Err(AppError::validation("Price must not be negative"));
        }
        let price = self.price.round_dp(2);
        if price > MAX_PRICE {
            return Err(AppError::validation(format!(
                "Price must be at most {}",
                MAX_PRICE
            )));
        }
        if self.stock < 0 {
            return Err(AppError::validation("Stock must not be negative"));
        }

        Ok(Self {
            title,
            description,
            price,
            category,
            is_active: self.is_active,
            stock: self.stock,
            owner_id: self.owner_id,
        })
    }

    pub fn into_new_item(self) -> NewItem {
        NewItem {
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            is_active: self.is_active,
            stock: self.stock,
            owner_id: self.owner_id,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Categories are stored and looked up trimmed and lower-cased
pub fn normalize_category(value: Option<String>) -> Option<String> {
    normalize_optional(value).map(|v| v.to_lowercase())
}

/// Body of the stock update endpoints
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct StockUpdateRequest {
    pub quantity: i32,
}

/// Public view of an item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemResponse {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_active: bool,
    pub stock: i32,
    pub owner_id: Option<EntityId>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            price: item.price,
            category: item.category,
            is_active: item.is_active,
            stock: item.stock,
            owner_id: item.owner_id,
        }
    }
}

/// Result of a total value calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemValueResponse {
    pub item_id: EntityId,
    pub quantity: i64,
    pub total_value: Decimal,
}

/// Result of a discount calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDiscountResponse {
    pub item_id: EntityId,
    pub original_price: Decimal,
    pub discount_percentage: Decimal,
    pub final_price: Decimal,
}
