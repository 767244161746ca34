//! User registry: create, look up, delete (cascading to images and likes).

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::{unix_timestamp, ImageDb};
use super::types::{User, UserId};

fn row_to_user(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        created_at: row.get("created_at"),
    }
}

impl ImageDb {
    /// Register a user. Fails if `username` is already taken.
    pub async fn create_user(&self, username: &str, email: Option<&str>) -> Result<UserId> {
        let id = sqlx::query(
            r#"
            INSERT INTO users (username, email, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to create user {username:?}"))?
        .last_insert_rowid();
        Ok(id)
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_user))
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row =
            sqlx::query("SELECT id, username, email, created_at FROM users WHERE username = ?1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.as_ref().map(row_to_user))
    }

    /// Delete a user. Their images and every like by or on them go with it.
    ///
    /// Returns the `stored_image` paths of the deleted images; blob cleanup is
    /// left to the caller.
    pub async fn delete_user(&self, id: UserId) -> Result<Vec<String>> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query("SELECT stored_image FROM images WHERE owner_id = ?1")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;
        let paths: Vec<String> = rows.iter().map(|r| r.get("stored_image")).collect();
        sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(paths)
    }
}
