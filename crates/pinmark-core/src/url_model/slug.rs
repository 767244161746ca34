//! Title slugs: ASCII, lowercase, hyphen-separated.

/// Longest slug stored on a record.
pub const SLUG_MAX: usize = 200;

/// Converts `value` into a URL-safe slug.
///
/// - Transliterates Unicode to ASCII (`Café` → `Cafe`)
/// - Lowercases
/// - Replaces every run of non-alphanumerics with a single `-`
/// - Trims leading/trailing `-` and caps the length at `SLUG_MAX`
pub fn slugify(value: &str) -> String {
    let ascii = deunicode::deunicode(value);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if out.len() > SLUG_MAX {
        out.truncate(SLUG_MAX);
        while out.ends_with('-') {
            out.pop();
        }
    }
    out
}

/// Return `true` when `value` is a valid slug: non-empty, at most `SLUG_MAX`
/// bytes, lowercase ASCII letters, digits and hyphens only.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= SLUG_MAX
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}
