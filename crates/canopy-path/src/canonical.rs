//! Path normalization and segment handling.
//!
//! Canonical form:
//! - the only separator is [`SEPARATOR`] (`/`); `\` on input is rewritten
//! - a normalized path starts with exactly one leading separator
//! - the drive prefix, when present, precedes the first separator and is
//!   split off before normalization

use crate::error::{PathError, Result};

/// The canonical path separator.
pub const SEPARATOR: char = '/';

/// The alternate separator accepted on input and rewritten to [`SEPARATOR`].
pub const ALT_SEPARATOR: char = '\\';

/// Separates a drive name from the rest of the path.
pub const DRIVE_SEPARATOR: char = ':';

/// Rewrite a raw (drive-less) path into canonical form.
///
/// All `\` separators become `/`, and the result starts with exactly one
/// leading `/`. Idempotent: `normalize(normalize(p)) == normalize(p)`.
///
/// # Examples
///
/// ```
/// use canopy_path::normalize;
///
/// assert_eq!(normalize(r"store\a\b"), "/store/a/b");
/// assert_eq!(normalize("//store"), "/store");
/// assert_eq!(normalize(""), "/");
/// ```
pub fn normalize(raw: &str) -> String {
    let replaced = raw.replace(ALT_SEPARATOR, "/");
    let trimmed = replaced.trim_start_matches(SEPARATOR);
    format!("{SEPARATOR}{trimmed}")
}

/// Split a path into its drive name and the remainder.
///
/// Splits on the first [`DRIVE_SEPARATOR`]. Returns `(None, path)` when no
/// drive separator is present.
///
/// # Examples
///
/// ```
/// use canopy_path::split_drive;
///
/// assert_eq!(split_drive("docs:/a/b"), (Some("docs"), "/a/b"));
/// assert_eq!(split_drive("/a/b"), (None, "/a/b"));
/// ```
pub fn split_drive(path: &str) -> (Option<&str>, &str) {
    match path.split_once(DRIVE_SEPARATOR) {
        Some((drive, rest)) => (Some(drive), rest),
        None => (None, path),
    }
}

/// The path with its drive prefix removed, or the whole string if no drive
/// separator is present.
pub fn strip_drive(path: &str) -> &str {
    split_drive(path).1
}

/// Non-empty segments of a path, in order. The drive prefix is ignored.
pub fn segments(path: &str) -> Vec<&str> {
    strip_drive(path)
        .split([SEPARATOR, ALT_SEPARATOR])
        .filter(|s| !s.is_empty())
        .collect()
}

/// The last non-empty segment of a path, or `None` for a root/empty path.
///
/// # Examples
///
/// ```
/// use canopy_path::leaf_name;
///
/// assert_eq!(leaf_name("docs:/a/b"), Some("b"));
/// assert_eq!(leaf_name("/"), None);
/// ```
pub fn leaf_name(path: &str) -> Option<&str> {
    segments(path).last().copied()
}

/// The normalized path minus its last segment.
///
/// The parent of a single-segment path, and of the root itself, is `/`.
pub fn parent_path(path: &str) -> String {
    let segs = segments(path);
    if segs.len() <= 1 {
        return SEPARATOR.to_string();
    }
    let mut out = String::new();
    for seg in &segs[..segs.len() - 1] {
        out.push(SEPARATOR);
        out.push_str(seg);
    }
    out
}

/// Join a parent path and a child name with a single separator.
///
/// # Examples
///
/// ```
/// use canopy_path::join;
///
/// assert_eq!(join("/a", "b"), "/a/b");
/// assert_eq!(join("/", "b"), "/b");
/// ```
pub fn join(parent: &str, child: &str) -> String {
    let parent = normalize(parent);
    let parent = parent.trim_end_matches(SEPARATOR);
    let child = child.trim_start_matches([SEPARATOR, ALT_SEPARATOR]);
    if child.is_empty() {
        return normalize(parent);
    }
    normalize(&format!("{parent}{SEPARATOR}{child}"))
}

/// Validate a path string, returning the reason it is malformed.
///
/// A path is well-formed when it is non-empty and normalization of its
/// drive-less remainder yields no zero-length segment: doubled separators
/// and trailing separators are rejected. A bare drive (`d:` or `d:/`) and
/// the root path `/` are well-formed.
pub fn validate(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let rest = normalize(strip_drive(path));
    if rest == "/" {
        return Ok(());
    }

    // Skip the single leading separator; any other empty chunk is a
    // doubled or trailing separator.
    for chunk in rest[1..].split(SEPARATOR) {
        if chunk.is_empty() {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
            });
        }
    }

    Ok(())
}

/// `true` when [`validate`] accepts the path.
pub fn is_well_formed(path: &str) -> bool {
    validate(path).is_ok()
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in ".*") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_has_exactly_one_leading_separator(raw in ".*") {
            let out = normalize(&raw);
            prop_assert!(out.starts_with(SEPARATOR));
            prop_assert!(out.len() == 1 || !out[1..].starts_with(SEPARATOR));
        }

        #[test]
        fn leaf_name_is_trailing_segment(
            segs in prop::collection::vec("[a-zA-Z0-9_.-]{1,8}", 1..6)
        ) {
            let path = format!("/{}", segs.join("/"));
            prop_assert!(is_well_formed(&path));
            prop_assert_eq!(leaf_name(&path), Some(segs.last().unwrap().as_str()));
        }
    }
}
