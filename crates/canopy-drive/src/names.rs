//! Drive name validation.
//!
//! Valid drive names:
//! - Must be non-empty
//! - Must not contain path or drive separators (`/`, `\`, `:`)
//! - Must not contain whitespace

use crate::error::{DriveError, Result};

/// Characters that are forbidden anywhere in a drive name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', ' ', '\t', '\n', '\r'];

/// Validate a drive name, returning `Ok(())` if valid.
///
/// A drive name becomes the prefix before `:` in every path addressed at
/// the drive, so it must not itself contain separator characters.
///
/// # Examples
///
/// ```
/// use canopy_drive::validate_drive_name;
///
/// assert!(validate_drive_name("docs").is_ok());
/// assert!(validate_drive_name("").is_err());
/// assert!(validate_drive_name("do:cs").is_err());
/// ```
pub fn validate_drive_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DriveError::InvalidName {
            name: name.to_string(),
            reason: "drive name must not be empty".into(),
        });
    }
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(DriveError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_drive_name("docs").is_ok());
        assert!(validate_drive_name("d").is_ok());
        assert!(validate_drive_name("archive-2").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(validate_drive_name("").is_err());
    }

    #[test]
    fn reject_separators() {
        assert!(validate_drive_name("a/b").is_err());
        assert!(validate_drive_name(r"a\b").is_err());
        assert!(validate_drive_name("a:b").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(validate_drive_name("a b").is_err());
        assert!(validate_drive_name("a\tb").is_err());
    }
}
