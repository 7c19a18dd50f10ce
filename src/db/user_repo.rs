// src/db/user_repo.rs

use chrono::Local;
use sqlx::SqlitePool;

use crate::{common::error::AppError, models::auth::User};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = ? AND deleted_at IS NULL",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        real_name: &str,
        role: &str,
    ) -> Result<User, AppError> {
        let now = Local::now().naive_local();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, real_name, role, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(real_name)
        .bind(role)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        id: i64,
        email: &str,
        real_name: &str,
        phone: &str,
        avatar: Option<&str>,
    ) -> Result<User, AppError> {
        // Avatar ausente no payload mantém o atual (COALESCE).
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = ?, real_name = ?, phone = ?, avatar = COALESCE(?, avatar), updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(real_name)
        .bind(phone)
        .bind(avatar)
        .bind(Local::now().naive_local())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        user.ok_or(AppError::UserNotFound)
    }

    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(password_hash)
        .bind(Local::now().naive_local())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
