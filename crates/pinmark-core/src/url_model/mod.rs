//! URL checks and filename derivation for submitted images.
//!
//! Everything here is pure: no network and no filesystem access.

mod extension;
mod slug;

pub use extension::{extension_of, image_extension, validate, ALLOWED_EXTENSIONS};
pub use slug::{is_valid_slug, slugify, SLUG_MAX};

use crate::submission::ValidationError;

/// Derives the stored filename `<slug>.<extension>` for an image.
///
/// The slug comes from `title`, the extension from the trailing `.xxx` of
/// `url`, lower-cased.
///
/// # Examples
///
/// - `derive_filename("My Vacation Photo!", "https://x.org/pic.JPG")` → `"my-vacation-photo.jpg"`
pub fn derive_filename(title: &str, url: &str) -> Result<String, ValidationError> {
    let name = slugify(title);
    if name.is_empty() {
        return Err(ValidationError::EmptySlug);
    }
    let ext = image_extension(url)?;
    Ok(format!("{name}.{ext}"))
}
