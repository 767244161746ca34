//! CLI command handlers, one file per command.

mod add;
mod checksum;
mod completions;
mod like;
mod list;
mod show;
mod user;

pub use add::run_add;
pub use checksum::run_checksum;
pub use completions::run_completions;
pub use like::{run_like, run_unlike};
pub use list::run_list;
pub use show::run_show;
pub use user::{run_user_add, run_user_remove};

use anyhow::{anyhow, Result};
use pinmark_core::image_db::{ImageDb, User};

/// Looks up a user by name, failing with a readable message when absent.
pub(crate) async fn require_user(db: &ImageDb, username: &str) -> Result<User> {
    db.find_user_by_username(username)
        .await?
        .ok_or_else(|| anyhow!("no such user: {username}"))
}

/// `YYYY-MM-DD HH:MM` in UTC for listings.
pub(crate) fn format_timestamp(unix: i64) -> String {
    chrono::DateTime::from_timestamp(unix, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
