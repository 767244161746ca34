//! SQLite-backed image database implementation.
//!
//! Handles connection, schema creation, and timestamp helpers. Record CRUD
//! lives in `users`, `images` and `likes`.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT,
        created_at INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS images (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        slug TEXT NOT NULL,
        source_url TEXT NOT NULL,
        stored_image TEXT NOT NULL,
        content_sha256 TEXT NOT NULL,
        size_bytes INTEGER NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at INTEGER NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS images_created_idx ON images (created_at DESC);",
    "CREATE INDEX IF NOT EXISTS images_owner_idx ON images (owner_id);",
    r#"
    CREATE TABLE IF NOT EXISTS image_likes (
        image_id INTEGER NOT NULL REFERENCES images(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        PRIMARY KEY (image_id, user_id)
    );
    "#,
];

/// Handle to the SQLite-backed image database.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ImageDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl ImageDb {
    /// Open (or create) the database at `path`, creating parent dirs, and
    /// make sure the schema exists.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(opts)
            .await
            .with_context(|| format!("failed to open database {}", path.display()))?;
        let db = ImageDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open a private in-memory database (single connection). Used by tests.
    pub async fn open_memory() -> Result<Self> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;
        let db = ImageDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("failed to create schema")?;
        }
        Ok(())
    }
}

/// Current time as Unix seconds (for DB timestamps).
pub fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
