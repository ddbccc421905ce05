use std::sync::Arc;

use crate::core::pagination::{Page, PageParams};
use crate::core::traits::{EntityId, Repository};
use crate::core::{AppError, Result};
use crate::modules::items::models::Item;
use crate::modules::items::repositories::ItemRepository;
use crate::modules::users::models::{User, UserMetrics, UserRequest};
use crate::modules::users::repositories::UserRepository;
use crate::unit_of_work::{complete, UnitOfWork, UnitOfWorkFactory};

/// User business rules
#[derive(Clone)]
pub struct UserService {
    uow: Arc<dyn UnitOfWorkFactory>,
}

fn user_not_found(id: EntityId) -> AppError {
    AppError::not_found(format!("User with id {} not found", id))
}

impl UserService {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow }
    }

    async fn load(uow: &mut dyn UnitOfWork, id: EntityId) -> Result<User> {
        uow.users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn get(&self, id: EntityId) -> Result<User> {
        tracing::debug!(user_id = id, "Fetching user");

        let mut uow = self.uow.begin().await?;
        let result = Self::load(&mut *uow, id).await;
        complete(uow, result).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        let email = email.trim().to_lowercase();
        tracing::debug!(%email, "Fetching user by email");

        let mut uow = self.uow.begin().await?;
        let result = uow.users().find_by_email(&email).await.and_then(|user| {
            user.ok_or_else(|| AppError::not_found(format!("User with email {} not found", email)))
        });
        complete(uow, result).await
    }

    pub async fn get_active_users(&self) -> Result<Vec<User>> {
        let mut uow = self.uow.begin().await?;
        let result = uow.users().find_active().await;
        complete(uow, result).await
    }

    /// Live items owned by an existing user
    pub async fn get_user_items(&self, user_id: EntityId) -> Result<Vec<Item>> {
        let mut uow = self.uow.begin().await?;
        let result = async {
            Self::load(&mut *uow, user_id).await?;
            uow.items().find_by_owner(user_id).await
        }
        .await;
        complete(uow, result).await
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<User>> {
        params.validate()?;

        let mut uow = self.uow.begin().await?;
        let result = uow.users().paginate(params).await;
        complete(uow, result).await
    }

    pub async fn create(&self, request: UserRequest) -> Result<User> {
        let new_user = request.validated()?.into_new_user();

        let mut uow = self.uow.begin().await?;
        let result = async {
            if uow.users().find_by_email(&new_user.email).await?.is_some() {
                return Err(AppError::conflict(format!(
                    "User with email '{}' already exists",
                    new_user.email
                )));
            }
            uow.users().add(new_user).await
        }
        .await;
        let user = complete(uow, result).await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Replace email, name and active flag
    pub async fn update(&self, id: EntityId, request: UserRequest) -> Result<User> {
        let request = request.validated()?;

        let mut uow = self.uow.begin().await?;
        let result = async {
            let existing = Self::load(&mut *uow, id).await?;

            if let Some(other) = uow.users().find_by_email(&request.email).await? {
                if other.id != id {
                    return Err(AppError::conflict(format!(
                        "User with email '{}' already exists",
                        request.email
                    )));
                }
            }

            uow.users()
                .update(User {
                    email: request.email,
                    name: request.name,
                    is_active: request.is_active,
                    ..existing
                })
                .await
        }
        .await;
        let user = complete(uow, result).await?;

        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let mut uow = self.uow.begin().await?;
        let result = uow.users().soft_delete(id).await;
        complete(uow, result).await?;

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Sum and mean of the values; an empty list yields zeros
    pub fn calculate_user_metrics(&self, values: &[f64]) -> Result<UserMetrics> {
        if values.is_empty() {
            return Ok(UserMetrics {
                total: 0.0,
                average: 0.0,
            });
        }

        let total: f64 = values.iter().sum();
        if !total.is_finite() {
            return Err(AppError::validation("Metric total is not a finite number"));
        }

        Ok(UserMetrics {
            total,
            average: total / values.len() as f64,
        })
    }
}
