//! Image submission input and its form-level validation.
//!
//! A submission is what a caller hands in (`title`, `url`, `description`,
//! optional `slug`); [`ImageSubmission::validate`] turns it into a
//! [`ValidatedSubmission`] or the first field error found.

mod error;

pub use error::ValidationError;

use crate::url_model;

/// Maximum title length, in characters.
pub const TITLE_MAX: usize = 200;
/// Maximum source URL length, in characters.
pub const URL_MAX: usize = 2000;

/// Raw record-creation request.
#[derive(Debug, Clone, Default)]
pub struct ImageSubmission {
    pub title: String,
    pub url: String,
    pub description: String,
    /// Explicit slug; derived from `title` when `None` or empty.
    pub slug: Option<String>,
}

impl ImageSubmission {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Checks every field and resolves the slug. Performs no I/O.
    pub fn validate(&self) -> Result<ValidatedSubmission, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Required { field: "title" });
        }
        check_len("title", title, TITLE_MAX)?;

        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::Required { field: "url" });
        }
        check_len("url", url, URL_MAX)?;
        match url::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
            _ => return Err(ValidationError::InvalidUrl),
        }
        let url = url_model::validate(url)?;

        // The stored filename stem always comes from the title, even when an
        // explicit slug is given.
        let derived = url_model::slugify(title);
        if derived.is_empty() {
            return Err(ValidationError::EmptySlug);
        }
        let slug = match self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(explicit) if url_model::is_valid_slug(explicit) => explicit.to_string(),
            Some(explicit) => return Err(ValidationError::InvalidSlug(explicit.to_string())),
            None => derived,
        };

        Ok(ValidatedSubmission {
            title: title.to_string(),
            url,
            description: self.description.trim().to_string(),
            slug,
        })
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Submission whose fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub title: String,
    pub url: String,
    pub description: String,
    pub slug: String,
}
