//! CLI for pinmark image bookmarks.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use pinmark_core::config;
use pinmark_core::image_db::ImageDb;
use pinmark_core::ingest::Ingestor;

use commands::{
    run_add, run_checksum, run_completions, run_like, run_list, run_show, run_unlike,
    run_user_add, run_user_remove,
};

/// Top-level CLI for pinmark.
#[derive(Debug, Parser)]
#[command(name = "pinmark")]
#[command(about = "pinmark: bookmark images from around the web", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch an image from a URL and bookmark it.
    Add {
        /// Username of the owner.
        #[arg(long)]
        owner: String,
        /// Image title; the stored filename is derived from it.
        #[arg(long)]
        title: String,
        /// Direct HTTP/HTTPS URL ending in .jpg, .jpeg or .png.
        #[arg(long)]
        url: String,
        /// Free-form description.
        #[arg(long, default_value = "")]
        description: String,
        /// Explicit slug instead of one derived from the title.
        #[arg(long)]
        slug: Option<String>,
    },

    /// Manage users.
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// List images, newest first.
    List {
        /// Only images owned by this user.
        #[arg(long, conflicts_with = "liked_by")]
        owner: Option<String>,
        /// Only images liked by this user.
        #[arg(long)]
        liked_by: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one image with its likes.
    Show {
        /// Image identifier.
        id: i64,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Like an image.
    Like {
        /// Image identifier.
        id: i64,
        /// Username of the liker.
        #[arg(long)]
        user: String,
    },

    /// Remove a like.
    Unlike {
        /// Image identifier.
        id: i64,
        /// Username of the liker.
        #[arg(long)]
        user: String,
    },

    /// Verify the SHA-256 of a stored image against its record.
    Checksum {
        /// Image identifier.
        id: i64,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Register a user.
    Add {
        username: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user with their images and likes.
    Remove { username: String },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let db = ImageDb::open_at(cfg.database_path()?).await?;
        let ingestor = Ingestor::from_config(db.clone(), &cfg)?;

        match cli.command {
            CliCommand::Add {
                owner,
                title,
                url,
                description,
                slug,
            } => run_add(&ingestor, &owner, &title, &url, &description, slug).await?,
            CliCommand::User { action } => match action {
                UserAction::Add { username, email } => {
                    run_user_add(&db, &username, email.as_deref()).await?
                }
                UserAction::Remove { username } => {
                    run_user_remove(&db, ingestor.store(), &username).await?
                }
            },
            CliCommand::List {
                owner,
                liked_by,
                json,
            } => run_list(&db, owner.as_deref(), liked_by.as_deref(), json).await?,
            CliCommand::Show { id, json } => run_show(&db, id, json).await?,
            CliCommand::Like { id, user } => run_like(&db, id, &user).await?,
            CliCommand::Unlike { id, user } => run_unlike(&db, id, &user).await?,
            CliCommand::Checksum { id } => run_checksum(&db, ingestor.store(), id).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
