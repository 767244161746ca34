//! Image record insert and reads. Listings are newest first.

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::ImageDb;
use super::types::{ImageId, ImageRecord, NewImage, UserId};

const IMAGE_COLUMNS: &str = "images.id, images.owner_id, images.title, images.slug, \
     images.source_url, images.stored_image, images.content_sha256, images.size_bytes, \
     images.description, images.created_at";

fn row_to_image(row: &SqliteRow) -> ImageRecord {
    ImageRecord {
        id: row.get("id"),
        owner: row.get("owner_id"),
        title: row.get("title"),
        slug: row.get("slug"),
        source_url: row.get("source_url"),
        stored_image: row.get("stored_image"),
        content_sha256: row.get("content_sha256"),
        size_bytes: row.get("size_bytes"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

impl ImageDb {
    /// Insert a record in its own transaction. The row is visible to other
    /// connections only once this returns `Ok`.
    pub async fn insert_image(&self, image: NewImage) -> Result<ImageRecord> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            r#"
            INSERT INTO images (
                owner_id, title, slug, source_url, stored_image,
                content_sha256, size_bytes, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(image.owner)
        .bind(&image.title)
        .bind(&image.slug)
        .bind(&image.source_url)
        .bind(&image.stored_image)
        .bind(&image.content_sha256)
        .bind(image.size_bytes)
        .bind(&image.description)
        .bind(image.created_at)
        .execute(&mut *tx)
        .await
        .context("insert image row")?
        .last_insert_rowid();
        tx.commit().await.context("commit image row")?;
        Ok(image.into_record(id))
    }

    pub async fn get_image(&self, id: ImageId) -> Result<Option<ImageRecord>> {
        let row = sqlx::query(&format!("SELECT {IMAGE_COLUMNS} FROM images WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_image))
    }

    /// All images, newest first.
    pub async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_image).collect())
    }

    /// Images created by `owner`, newest first.
    pub async fn list_images_by_owner(&self, owner: UserId) -> Result<Vec<ImageRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE owner_id = ?1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_image).collect())
    }

    /// Images liked by `user`, newest first.
    pub async fn list_images_liked_by(&self, user: UserId) -> Result<Vec<ImageRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images \
             JOIN image_likes ON image_likes.image_id = images.id \
             WHERE image_likes.user_id = ?1 \
             ORDER BY images.created_at DESC, images.id DESC"
        ))
        .bind(user)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_image).collect())
    }
}
