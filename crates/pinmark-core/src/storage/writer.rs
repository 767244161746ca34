//! Temp-file writer with no-clobber finalize.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::unique::{numbered_filename, MAX_NAME_ATTEMPTS};
use super::TEMP_SUFFIX;

/// A payload being written to a hidden `.part` file inside its target
/// directory. Dropping the writer without finalizing removes the temp file.
pub struct BlobWriter {
    temp: NamedTempFile,
    dir: PathBuf,
}

impl BlobWriter {
    /// Create a new temp file in `dir` (which must exist).
    pub fn create_in(dir: &Path) -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix(".")
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        Ok(BlobWriter {
            temp,
            dir: dir.to_path_buf(),
        })
    }

    /// Append `data` to the temp file.
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.temp
            .as_file_mut()
            .write_all(data)
            .context("storage write failed")?;
        Ok(())
    }

    /// Sync file data to disk. Call before `finalize` for durability.
    pub fn sync(&self) -> Result<()> {
        self.temp.as_file().sync_all().context("storage sync failed")?;
        Ok(())
    }

    /// Move the temp file to `filename` in its directory without ever
    /// replacing an existing file. A taken name is retried as `name_1.ext`,
    /// `name_2.ext`, ... Returns the final file name.
    pub fn finalize(self, filename: &str) -> Result<String> {
        let BlobWriter { mut temp, dir } = self;
        for n in 0..MAX_NAME_ATTEMPTS {
            let candidate = numbered_filename(filename, n);
            let target = dir.join(&candidate);
            match temp.persist_noclobber(&target) {
                Ok(_) => return Ok(candidate),
                Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::debug!(taken = %target.display(), "name taken, trying next");
                    temp = e.file;
                }
                Err(e) => {
                    return Err(e.error).with_context(|| {
                        format!("failed to move blob to {}", target.display())
                    })
                }
            }
        }
        anyhow::bail!(
            "no free name for {} in {} after {} attempts",
            filename,
            dir.display(),
            MAX_NAME_ATTEMPTS
        )
    }
}
