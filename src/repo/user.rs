use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: Arc<SqlitePool>,
}

impl UserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, email: &str, password_hash: &str, name: Option<&str>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, created_at)
            VALUES ($1, $2, $3, datetime('now'))
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("User not found"))
    }

    /// Case-insensitive lookup.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email.trim())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1))",
        )
        .bind(email.trim())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    pub async fn update_name(&self, id: i64, name: Option<&str>) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("User not found"))
    }
}
