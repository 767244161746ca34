//! `pinmark add` – fetch an image and bookmark it.

use anyhow::{Context, Result};
use pinmark_core::ingest::Ingestor;
use pinmark_core::submission::ImageSubmission;

use super::require_user;

pub async fn run_add(
    ingestor: &Ingestor,
    owner: &str,
    title: &str,
    url: &str,
    description: &str,
    slug: Option<String>,
) -> Result<()> {
    let user = require_user(ingestor.db(), owner).await?;
    let mut submission = ImageSubmission::new(title, url).with_description(description);
    if let Some(slug) = slug {
        submission = submission.with_slug(slug);
    }
    let record = ingestor
        .ingest(user.id, &submission)
        .await
        .with_context(|| format!("could not add image from {url}"))?;
    println!("Added image {} at {}", record.id, record.absolute_url());
    println!("Stored as {}", record.stored_image);
    Ok(())
}
