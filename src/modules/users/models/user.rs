use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::traits::EntityId;
use crate::core::{AppError, Result};

/// User row as stored in `users`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub items_count: i32,
    pub create_date: NaiveDateTime,
    pub update_date: Option<NaiveDateTime>,
    pub is_deleted: bool,
}

/// Values for inserting a user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub is_active: bool,
}

/// Body of `POST /users` and `PUT /users/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserRequest {
    pub email: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserRequest {
    /// Trim and check the fields; returns the normalized request
    pub fn validated(self) -> Result<Self> {
        let email = self.email.trim().to_lowercase();
        let name = self.name.trim().to_string();

        if !is_plausible_email(&email) {
            return Err(AppError::validation(format!("Invalid email address: {}", self.email)));
        }
        if email.len() > 255 {
            return Err(AppError::validation("Email must be at most 255 characters"));
        }
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }
        if name.chars().count() > 255 {
            return Err(AppError::validation("Name must be at most 255 characters"));
        }

        Ok(Self {
            email,
            name,
            is_active: self.is_active,
        })
    }

    pub fn into_new_user(self) -> NewUser {
        NewUser {
            email: self.email,
            name: self.name,
            is_active: self.is_active,
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub items_count: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            items_count: user.items_count,
        }
    }
}

/// Body of `POST /api/v2/users/metrics`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserMetricsRequest {
    pub metric_values: Vec<f64>,
}

/// Sum and mean of a list of metric values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub total: f64,
    pub average: f64,
}
