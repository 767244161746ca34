//! Image extension allow-list, checked on the raw URL text.

use crate::submission::ValidationError;

/// Extensions accepted for submitted image URLs (compared lower-cased).
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Returns the lower-cased text after the last `.` of `url`, or `None` when
/// the URL has no dot or nothing follows it.
///
/// The whole URL is inspected, so a query string after the extension is part
/// of the result (`pic.jpg?w=2` yields `jpg?w=2`).
pub fn extension_of(url: &str) -> Option<String> {
    let (_, ext) = url.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Returns the allowed, lower-cased extension of `url`.
pub fn image_extension(url: &str) -> Result<String, ValidationError> {
    match extension_of(url) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        _ => Err(ValidationError::InvalidExtension),
    }
}

/// Checks `url` against the extension allow-list and hands it back unchanged.
///
/// Purely syntactic: nothing is fetched or resolved.
pub fn validate(url: &str) -> Result<String, ValidationError> {
    image_extension(url)?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extensions_any_case() {
        for url in [
            "https://example.com/a.jpg",
            "https://example.com/a.JPG",
            "https://example.com/b.jpeg",
            "https://example.com/b.JpEg",
            "https://example.com/c.png",
            "http://cdn.example.com/x/y/z.PNG",
        ] {
            assert_eq!(validate(url).unwrap(), url, "{url}");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        for url in [
            "https://example.com/a.gif",
            "https://example.com/a.webp",
            "https://example.com/a.jpg.exe",
            "https://example.com/a.jpg?size=large",
        ] {
            assert_eq!(validate(url), Err(ValidationError::InvalidExtension), "{url}");
        }
    }

    #[test]
    fn no_dot_is_an_error_not_a_panic() {
        assert_eq!(validate("nodot"), Err(ValidationError::InvalidExtension));
        assert_eq!(validate(""), Err(ValidationError::InvalidExtension));
        assert_eq!(extension_of("nodot"), None);
    }

    #[test]
    fn trailing_dot_is_rejected() {
        assert_eq!(extension_of("https://example.com/a."), None);
        assert_eq!(
            validate("https://example.com/a."),
            Err(ValidationError::InvalidExtension)
        );
    }

    #[test]
    fn extension_is_lower_cased() {
        assert_eq!(image_extension("https://x.org/pic.JPG").unwrap(), "jpg");
        assert_eq!(extension_of("https://x.org/pic.TIFF").as_deref(), Some("tiff"));
    }
}
