use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlConnection;

use crate::core::pagination::{Page, PageParams};
use crate::core::traits::{EntityId, Repository};
use crate::core::{AppError, Result};
use crate::modules::users::models::{NewUser, User};
use crate::unit_of_work::mysql::{delete_ids, inserted_id, soft_delete_ids};

/// User persistence on top of the generic repository contract
#[async_trait]
pub trait UserRepository: Repository<User, NewUser> {
    /// Live user with this (normalized) email
    async fn find_by_email(&mut self, email: &str) -> Result<Option<User>>;

    /// Live users with `is_active` set, ordered by ID
    async fn find_active(&mut self) -> Result<Vec<User>>;

    /// Add `delta` to `items_count`, clamping at zero
    async fn adjust_items_count(&mut self, id: EntityId, delta: i32) -> Result<()>;
}

pub(crate) fn duplicate_email(email: &str) -> String {
    format!("User with email '{}' already exists", email)
}

fn user_not_found(id: EntityId) -> AppError {
    AppError::not_found(format!("User with id {} not found", id))
}

/// MySQL user repository bound to one transaction
pub struct MySqlUserRepository<'c> {
    conn: &'c mut MySqlConnection,
}

impl<'c> MySqlUserRepository<'c> {
    pub fn new(conn: &'c mut MySqlConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<User, NewUser> for MySqlUserRepository<'_> {
    async fn find_by_id(&mut self, id: EntityId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, is_active, items_count,
                   create_date, update_date, is_deleted
            FROM users
            WHERE id = ? AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    async fn find_all(&mut self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, is_active, items_count,
                   create_date, update_date, is_deleted
            FROM users
            WHERE is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(users)
    }

    async fn add(&mut self, user: NewUser) -> Result<User> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, name, is_active, items_count, create_date, is_deleted)
            VALUES (?, ?, ?, 0, ?, FALSE)
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.is_active)
        .bind(now)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| AppError::from_write(e, duplicate_email(&user.email)))?;

        Ok(User {
            id: inserted_id(result.last_insert_id())?,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            items_count: 0,
            create_date: now,
            update_date: None,
            is_deleted: false,
        })
    }

    async fn update(&mut self, mut user: User) -> Result<User> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, name = ?, is_active = ?, items_count = ?, update_date = ?
            WHERE id = ? AND is_deleted = FALSE
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.is_active)
        .bind(user.items_count)
        .bind(now)
        .bind(user.id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| AppError::from_write(e, duplicate_email(&user.email)))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        user.update_date = Some(now);
        Ok(user)
    }

    async fn soft_delete(&mut self, id: EntityId) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = TRUE, update_date = ? WHERE id = ? AND is_deleted = FALSE",
        )
        .bind(Utc::now().naive_utc())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    async fn soft_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        soft_delete_ids(&mut *self.conn, "users", ids, Utc::now().naive_utc()).await
    }

    async fn permanent_delete(&mut self, id: EntityId) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| AppError::from_write(e, format!("User with id {} still owns items", id)))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    async fn permanent_delete_range(&mut self, ids: &[EntityId]) -> Result<()> {
        delete_ids(&mut *self.conn, "users", ids).await
    }

    async fn paginate(&mut self, params: PageParams) -> Result<Page<User>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_deleted = FALSE")
                .fetch_one(&mut *self.conn)
                .await?;

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, is_active, items_count,
                   create_date, update_date, is_deleted
            FROM users
            WHERE is_deleted = FALSE
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(Page::new(users, total.max(0) as u64, params))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository<'_> {
    async fn find_by_email(&mut self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, is_active, items_count,
                   create_date, update_date, is_deleted
            FROM users
            WHERE email = ? AND is_deleted = FALSE
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    async fn find_active(&mut self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, is_active, items_count,
                   create_date, update_date, is_deleted
            FROM users
            WHERE is_active = TRUE AND is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(users)
    }

    async fn adjust_items_count(&mut self, id: EntityId, delta: i32) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET items_count = GREATEST(items_count + ?, 0), update_date = ?
            WHERE id = ? AND is_deleted = FALSE
            "#,
        )
        .bind(delta)
        .bind(Utc::now().naive_utc())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }
}
