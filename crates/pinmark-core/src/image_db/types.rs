//! Types used by the image database.

use serde::Serialize;

/// User identifier.
pub type UserId = i64;

/// Image record identifier.
pub type ImageId = i64;

/// Minimal user registry entry. Images reference users as owners and likers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub created_at: i64,
}

/// A shared image: metadata plus the location of its stored bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub id: ImageId,
    pub owner: UserId,
    pub title: String,
    /// URL-safe identifier derived from the title; not unique.
    pub slug: String,
    /// URL the image was fetched from.
    pub source_url: String,
    /// Path of the stored file relative to the media root.
    pub stored_image: String,
    /// Lowercase hex SHA-256 of the stored bytes.
    pub content_sha256: String,
    pub size_bytes: i64,
    pub description: String,
    /// Unix seconds, set once on insert.
    pub created_at: i64,
}

impl ImageRecord {
    /// Canonical location of the record: `/images/detail/{id}/{slug}/`.
    pub fn absolute_url(&self) -> String {
        format!("/images/detail/{}/{}/", self.id, self.slug)
    }
}

/// Fully prepared row for [`ImageDb::insert_image`](super::ImageDb::insert_image).
#[derive(Debug, Clone)]
pub struct NewImage {
    pub owner: UserId,
    pub title: String,
    pub slug: String,
    pub source_url: String,
    pub stored_image: String,
    pub content_sha256: String,
    pub size_bytes: i64,
    pub description: String,
    pub created_at: i64,
}

impl NewImage {
    pub(crate) fn into_record(self, id: ImageId) -> ImageRecord {
        ImageRecord {
            id,
            owner: self.owner,
            title: self.title,
            slug: self.slug,
            source_url: self.source_url,
            stored_image: self.stored_image,
            content_sha256: self.content_sha256,
            size_bytes: self.size_bytes,
            description: self.description,
            created_at: self.created_at,
        }
    }
}
