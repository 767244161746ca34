//! Like / unlike: the only mutation an image record sees after insert.

use anyhow::Result;
use sqlx::Row;

use super::db::ImageDb;
use super::types::{ImageId, User, UserId};

impl ImageDb {
    /// Add `user` to the likers of `image`. Returns `true` if the like is new.
    pub async fn like(&self, image: ImageId, user: UserId) -> Result<bool> {
        let r = sqlx::query("INSERT OR IGNORE INTO image_likes (image_id, user_id) VALUES (?1, ?2)")
            .bind(image)
            .bind(user)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected() == 1)
    }

    /// Remove `user` from the likers of `image`. Returns `true` if a like was removed.
    pub async fn unlike(&self, image: ImageId, user: UserId) -> Result<bool> {
        let r = sqlx::query("DELETE FROM image_likes WHERE image_id = ?1 AND user_id = ?2")
            .bind(image)
            .bind(user)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected() == 1)
    }

    /// Users who like `image`, by username.
    pub async fn likers(&self, image: ImageId) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT users.id, users.username, users.email, users.created_at
            FROM users
            JOIN image_likes ON image_likes.user_id = users.id
            WHERE image_likes.image_id = ?1
            ORDER BY users.username
            "#,
        )
        .bind(image)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|row| User {
                id: row.get("id"),
                username: row.get("username"),
                email: row.get("email"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    pub async fn total_likes(&self, image: ImageId) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM image_likes WHERE image_id = ?1")
            .bind(image)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}
