//! Blob storage for fetched images.
//!
//! Files live under a media root in date-partitioned directories
//! (`images/YYYY/MM/DD/`). Writes go to a temp `.part` file first and are
//! then renamed into place without overwriting anything already there.

mod unique;
mod writer;

pub use unique::{numbered_filename, MAX_NAME_ATTEMPTS};
pub use writer::BlobWriter;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Component, Path, PathBuf};

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Top-level directory under the media root for image uploads.
pub const UPLOAD_PREFIX: &str = "images";

/// Result of a successful blob write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Path relative to the media root, `/`-separated.
    pub relative_path: String,
    pub size_bytes: u64,
}

/// Filesystem blob store rooted at a media directory.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

/// Relative upload directory for `date`: `images/YYYY/MM/DD`.
pub fn upload_dir(date: NaiveDate) -> String {
    format!("{}/{}", UPLOAD_PREFIX, date.format("%Y/%m/%d"))
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a stored relative path. Rejects `..` and absolute paths.
    pub fn path_of(&self, relative: &str) -> Result<PathBuf> {
        let rel = Path::new(relative);
        if relative.is_empty() || !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            anyhow::bail!("invalid stored path: {relative:?}");
        }
        Ok(self.root.join(rel))
    }

    /// Writes `data` as `filename` under the upload directory for `date`,
    /// creating directories as needed. If the name is taken the stored name
    /// gets a numeric suffix; the returned path is the one actually used.
    pub fn write(&self, filename: &str, data: &[u8], date: NaiveDate) -> Result<StoredBlob> {
        let dir_rel = upload_dir(date);
        let dir = self.root.join(&dir_rel);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let mut writer = BlobWriter::create_in(&dir)?;
        writer.write_all(data)?;
        writer.sync()?;
        let final_name = writer.finalize(filename)?;

        let relative_path = format!("{dir_rel}/{final_name}");
        tracing::debug!(path = %relative_path, bytes = data.len(), "stored blob");
        Ok(StoredBlob {
            relative_path,
            size_bytes: data.len() as u64,
        })
    }

    /// Reads a stored blob back.
    pub fn read(&self, relative: &str) -> Result<Vec<u8>> {
        let path = self.path_of(relative)?;
        std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path_of(relative).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Deletes a stored blob. A missing file is not an error.
    pub fn remove(&self, relative: &str) -> Result<()> {
        let path = self.path_of(relative)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn upload_dir_is_zero_padded() {
        assert_eq!(upload_dir(day()), "images/2024/03/07");
    }

    #[test]
    fn write_creates_date_dirs_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        let blob = store.write("sunset.jpg", b"jpeg-bytes", day()).unwrap();
        assert_eq!(blob.relative_path, "images/2024/03/07/sunset.jpg");
        assert_eq!(blob.size_bytes, 10);
        assert!(dir.path().join("images/2024/03/07/sunset.jpg").is_file());
        assert_eq!(store.read(&blob.relative_path).unwrap(), b"jpeg-bytes");
    }

    #[test]
    fn same_name_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        let a = store.write("cat.png", b"first", day()).unwrap();
        let b = store.write("cat.png", b"second", day()).unwrap();
        let c = store.write("cat.png", b"third", day()).unwrap();
        assert_eq!(a.relative_path, "images/2024/03/07/cat.png");
        assert_eq!(b.relative_path, "images/2024/03/07/cat_1.png");
        assert_eq!(c.relative_path, "images/2024/03/07/cat_2.png");
        assert_eq!(store.read(&a.relative_path).unwrap(), b"first");
        assert_eq!(store.read(&b.relative_path).unwrap(), b"second");
        assert_eq!(store.read(&c.relative_path).unwrap(), b"third");
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        store.write("a.png", b"x", day()).unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path().join(upload_dir(day())))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png".to_string()]);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        let blob = store.write("a.png", b"x", day()).unwrap();
        assert!(store.exists(&blob.relative_path));
        store.remove(&blob.relative_path).unwrap();
        assert!(!store.exists(&blob.relative_path));
        store.remove(&blob.relative_path).unwrap();
    }

    #[test]
    fn path_of_rejects_escapes() {
        let store = BlobStore::new("/srv/media");
        assert!(store.path_of("../etc/passwd").is_err());
        assert!(store.path_of("/etc/passwd").is_err());
        assert!(store.path_of("").is_err());
        assert_eq!(
            store.path_of("images/2024/01/01/a.png").unwrap(),
            PathBuf::from("/srv/media/images/2024/01/01/a.png")
        );
    }
}
