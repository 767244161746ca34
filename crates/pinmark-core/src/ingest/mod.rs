//! Image ingestion pipeline.
//!
//! `Validating → Deriving → Fetching → Persisting → Done`. The fetch runs to
//! completion before anything is written; the blob is stored before the row
//! is inserted, and removed again if the insert fails, so a record is never
//! queryable without its file.

mod error;

pub use error::{IngestError, Stage};

use anyhow::Result;
use std::sync::Arc;

use crate::checksum;
use crate::config::PinmarkConfig;
use crate::fetch::{self, HttpSource, ImageSource};
use crate::image_db::{unix_timestamp, ImageDb, ImageRecord, NewImage, UserId};
use crate::storage::BlobStore;
use crate::submission::ImageSubmission;
use crate::url_model;

/// Runs submissions through the pipeline against one database, blob store
/// and image source.
#[derive(Clone)]
pub struct Ingestor {
    db: ImageDb,
    store: BlobStore,
    source: Arc<dyn ImageSource>,
}

impl Ingestor {
    pub fn new(db: ImageDb, store: BlobStore, source: Arc<dyn ImageSource>) -> Self {
        Self { db, store, source }
    }

    /// Ingestor using the configured media root and HTTP fetch policy.
    pub fn from_config(db: ImageDb, cfg: &PinmarkConfig) -> Result<Self> {
        let store = BlobStore::new(cfg.media_root()?);
        let source = Arc::new(HttpSource::new(cfg.fetch.clone()));
        Ok(Self::new(db, store, source))
    }

    pub fn db(&self) -> &ImageDb {
        &self.db
    }

    pub fn store(&self) -> &BlobStore {
        &self.store
    }

    /// Validates `submission`, fetches the image, stores it and commits the
    /// record owned by `owner`.
    pub async fn ingest(
        &self,
        owner: UserId,
        submission: &ImageSubmission,
    ) -> Result<ImageRecord, IngestError> {
        tracing::debug!(owner, url = %submission.url, stage = Stage::Validating.as_str());
        let valid = submission.validate()?;
        let owner_exists = self
            .db
            .get_user(owner)
            .await
            .map_err(|e| IngestError::PersistFailed(format!("{e:#}")))?
            .is_some();
        if !owner_exists {
            return Err(IngestError::UnknownOwner(owner));
        }

        tracing::debug!(owner, stage = Stage::Deriving.as_str());
        let filename = url_model::derive_filename(&valid.title, &valid.url)?;

        tracing::debug!(owner, url = %valid.url, stage = Stage::Fetching.as_str());
        let bytes = fetch::fetch_image(Arc::clone(&self.source), &valid.url)
            .await
            .map_err(|e| {
                tracing::warn!(url = %valid.url, kind = ?e.kind(), "image fetch failed: {}", e);
                e
            })?;

        tracing::debug!(owner, %filename, bytes = bytes.len(), stage = Stage::Persisting.as_str());
        let created_at = unix_timestamp();
        let date = chrono::DateTime::from_timestamp(created_at, 0)
            .unwrap_or_default()
            .date_naive();
        let content_sha256 = checksum::sha256_bytes(&bytes);
        let store = self.store.clone();
        let blob = tokio::task::spawn_blocking(move || store.write(&filename, &bytes, date))
            .await
            .map_err(|e| IngestError::StorageWriteFailed(e.to_string()))?
            .map_err(|e| IngestError::StorageWriteFailed(format!("{e:#}")))?;

        let new_image = NewImage {
            owner,
            title: valid.title,
            slug: valid.slug,
            source_url: valid.url,
            stored_image: blob.relative_path.clone(),
            content_sha256,
            size_bytes: blob.size_bytes as i64,
            description: valid.description,
            created_at,
        };
        match self.db.insert_image(new_image).await {
            Ok(record) => {
                tracing::info!(
                    id = record.id,
                    owner,
                    path = %record.stored_image,
                    stage = Stage::Done.as_str(),
                    "image added"
                );
                Ok(record)
            }
            Err(e) => {
                if let Err(rm) = self.store.remove(&blob.relative_path) {
                    tracing::warn!(path = %blob.relative_path, "could not remove orphaned blob: {:#}", rm);
                }
                Err(IngestError::PersistFailed(format!("{e:#}")))
            }
        }
    }
}
