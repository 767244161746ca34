//! `pinmark show <id>` – one image with its likers.

use anyhow::{anyhow, Result};
use pinmark_core::image_db::ImageDb;

use super::format_timestamp;

pub async fn run_show(db: &ImageDb, id: i64, json: bool) -> Result<()> {
    let image = db
        .get_image(id)
        .await?
        .ok_or_else(|| anyhow!("no such image: {id}"))?;
    let likers = db.likers(id).await?;
    let total_likes = db.total_likes(id).await?;

    if json {
        let value = serde_json::json!({
            "image": image,
            "absolute_url": image.absolute_url(),
            "total_likes": total_likes,
            "liked_by": likers.iter().map(|u| &u.username).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let owner = db
        .get_user(image.owner)
        .await?
        .map(|u| u.username)
        .unwrap_or_else(|| image.owner.to_string());
    println!("{} ({})", image.title, image.absolute_url());
    println!("  owner:    {owner}");
    println!("  created:  {}", format_timestamp(image.created_at));
    println!("  source:   {}", image.source_url);
    println!("  stored:   {} ({} bytes)", image.stored_image, image.size_bytes);
    println!("  sha256:   {}", image.content_sha256);
    if !image.description.is_empty() {
        println!("  about:    {}", image.description);
    }
    let names: Vec<&str> = likers.iter().map(|u| u.username.as_str()).collect();
    println!("  likes:    {total_likes} {}", names.join(", "));
    Ok(())
}
