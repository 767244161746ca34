//! Collision-avoiding filename candidates.

/// How many numbered names are tried before giving up on a directory.
pub const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Returns the `n`th candidate for `name`: the name itself for `n == 0`,
/// otherwise `_n` inserted before the extension (`photo.jpg` → `photo_2.jpg`).
pub fn numbered_filename(name: &str, n: u32) -> String {
    if n == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{n}.{ext}"),
        _ => format!("{name}_{n}"),
    }
}
