//! `pinmark like|unlike <id> --user <name>`.

use anyhow::{bail, Result};
use pinmark_core::image_db::ImageDb;

use super::require_user;

pub async fn run_like(db: &ImageDb, id: i64, username: &str) -> Result<()> {
    let user = require_user(db, username).await?;
    if db.get_image(id).await?.is_none() {
        bail!("no such image: {id}");
    }
    if db.like(id, user.id).await? {
        println!("{username} likes image {id}");
    } else {
        println!("{username} already likes image {id}");
    }
    Ok(())
}

pub async fn run_unlike(db: &ImageDb, id: i64, username: &str) -> Result<()> {
    let user = require_user(db, username).await?;
    if db.unlike(id, user.id).await? {
        println!("{username} no longer likes image {id}");
    } else {
        println!("{username} did not like image {id}");
    }
    Ok(())
}
