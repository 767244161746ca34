//! Persistent image database (SQLite via sqlx).
//!
//! Stores users, image records and likes. Deleting a user cascades to the
//! images they own and to every like that references them.

mod db;
mod images;
mod likes;
mod types;
mod users;

pub use db::{unix_timestamp, ImageDb};
pub use types::*;
