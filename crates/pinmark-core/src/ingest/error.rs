//! Ingestion stages and failure taxonomy.

use crate::fetch::FetchError;
use crate::image_db::UserId;
use crate::submission::ValidationError;

/// Pipeline stage. Failures can only happen while validating, fetching or
/// persisting; every failure ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Deriving,
    Fetching,
    Persisting,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Deriving => "deriving",
            Stage::Fetching => "fetching",
            Stage::Persisting => "persisting",
            Stage::Done => "done",
        }
    }
}

/// Why a submission did not produce a record. None of these leave a
/// queryable record behind.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Bad input; nothing was fetched or written.
    #[error("invalid {}: {0}", .0.field())]
    Invalid(#[from] ValidationError),
    /// The owner is not a registered user; nothing was fetched or written.
    #[error("user {0} does not exist")]
    UnknownOwner(UserId),
    /// The remote image could not be retrieved; nothing was written.
    #[error("failed to fetch image: {0}")]
    FetchFailed(#[from] FetchError),
    /// The fetched bytes could not be written; no row was created.
    #[error("failed to store image: {0}")]
    StorageWriteFailed(String),
    /// The row could not be committed; the stored blob has been removed.
    #[error("failed to save image record: {0}")]
    PersistFailed(String),
}

impl IngestError {
    /// Stage the pipeline was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            IngestError::Invalid(_) | IngestError::UnknownOwner(_) => Stage::Validating,
            IngestError::FetchFailed(_) => Stage::Fetching,
            IngestError::StorageWriteFailed(_) | IngestError::PersistFailed(_) => Stage::Persisting,
        }
    }

    /// Field the error belongs to, for input errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            IngestError::Invalid(e) => Some(e.field()),
            _ => None,
        }
    }
}
