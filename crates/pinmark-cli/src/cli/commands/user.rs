//! `pinmark user add|remove` – manage the user registry.

use anyhow::Result;
use pinmark_core::image_db::ImageDb;
use pinmark_core::storage::BlobStore;

use super::require_user;

pub async fn run_user_add(db: &ImageDb, username: &str, email: Option<&str>) -> Result<()> {
    let id = db.create_user(username, email).await?;
    println!("Added user {id}: {username}");
    Ok(())
}

/// Deletes the user; their images and likes go with them, and the stored
/// files of their images are removed from the media root.
pub async fn run_user_remove(db: &ImageDb, store: &BlobStore, username: &str) -> Result<()> {
    let user = require_user(db, username).await?;
    let paths = db.delete_user(user.id).await?;
    for path in &paths {
        match store.remove(path) {
            Ok(()) => tracing::debug!(%path, "deleted stored image"),
            Err(e) => tracing::warn!(%path, "could not delete stored image: {:#}", e),
        }
    }
    println!("Removed user {username} and {} image(s)", paths.len());
    Ok(())
}
