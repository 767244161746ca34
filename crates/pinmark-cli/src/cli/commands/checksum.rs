//! Checksum command: verify SHA-256 of a stored image.

use anyhow::{anyhow, bail, Result};
use pinmark_core::checksum;
use pinmark_core::image_db::ImageDb;
use pinmark_core::storage::BlobStore;

/// Recompute the digest of the stored file and compare with the record.
pub async fn run_checksum(db: &ImageDb, store: &BlobStore, id: i64) -> Result<()> {
    let image = db
        .get_image(id)
        .await?
        .ok_or_else(|| anyhow!("no such image: {id}"))?;
    let path = store.path_of(&image.stored_image)?;
    let digest = checksum::sha256_path(&path)?;
    println!("{}  {}", digest, path.display());
    if digest != image.content_sha256 {
        bail!(
            "checksum mismatch for image {id}: recorded {}, found {}",
            image.content_sha256,
            digest
        );
    }
    Ok(())
}
