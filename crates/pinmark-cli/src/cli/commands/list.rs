//! `pinmark list` – list images, newest first.

use anyhow::Result;
use pinmark_core::image_db::ImageDb;

use super::{format_timestamp, require_user};

pub async fn run_list(
    db: &ImageDb,
    owner: Option<&str>,
    liked_by: Option<&str>,
    json: bool,
) -> Result<()> {
    let images = match (owner, liked_by) {
        (Some(name), _) => db.list_images_by_owner(require_user(db, name).await?.id).await?,
        (None, Some(name)) => db.list_images_liked_by(require_user(db, name).await?.id).await?,
        (None, None) => db.list_images().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }
    if images.is_empty() {
        println!("No images.");
        return Ok(());
    }
    println!("{:<6} {:<16} {:<10} {:<30} {}", "ID", "CREATED", "SIZE", "TITLE", "PATH");
    for img in images {
        println!(
            "{:<6} {:<16} {:<10} {:<30} {}",
            img.id,
            format_timestamp(img.created_at),
            img.size_bytes,
            img.title,
            img.stored_image
        );
    }
    Ok(())
}
