//! Name validation and naming-path helpers.
//!
//! Valid names:
//! - Must be non-empty and at most 255 bytes
//! - Must not contain whitespace, control characters, `/`, `\`, `?`, `#`
//! - Must not be `.` or `..`

use crate::error::{NameError, NameResult};

/// Namespace marker prefixed to every naming path.
pub const NAMING_PREFIX: &str = "/ipns/";

const MAX_NAME_LEN: usize = 255;

/// Characters that are forbidden anywhere in a name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '?', '#'];

/// Validate a name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use ipath_names::validate_name;
///
/// assert!(validate_name("example.name").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("a/b").is_err());
/// ```
pub fn validate_name(name: &str) -> NameResult<()> {
    let invalid = |reason: String| NameError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid(format!("longer than {MAX_NAME_LEN} bytes")));
    }
    if name == "." || name == ".." {
        return Err(invalid("must not be '.' or '..'".into()));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(c))
    {
        return Err(invalid(format!("contains forbidden character: {ch:?}")));
    }
    Ok(())
}

/// Build the naming path for `name`.
pub fn naming_path(name: &str) -> NameResult<String> {
    validate_name(name)?;
    Ok(format!("{NAMING_PREFIX}{name}"))
}

/// The part of `path` after the naming prefix, if it has one.
pub fn strip_naming_prefix(path: &str) -> Option<&str> {
    path.strip_prefix(NAMING_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_name("example.name").is_ok());
        assert!(validate_name("k51qzi5uqu5dlvj2baxnqndepeb86cbk3ng7n3i46uzyxzyqj2xjonzllnv0v8").is_ok());
        assert!(validate_name("docs.ipfs.tech").is_ok());
    }

    #[test]
    fn reject_empty_and_dots() {
        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn reject_forbidden_chars() {
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("a?b").is_err());
        assert!(validate_name("a#b").is_err());
        assert!(validate_name("has space").is_err());
        assert!(validate_name("tab\there").is_err());
        assert!(validate_name("nul\0").is_err());
    }

    #[test]
    fn reject_overlong() {
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn naming_path_prefixes() {
        assert_eq!(naming_path("example.name").unwrap(), "/ipns/example.name");
        assert!(matches!(
            naming_path("bad name"),
            Err(NameError::InvalidName { .. })
        ));
    }

    #[test]
    fn strip_prefix() {
        assert_eq!(strip_naming_prefix("/ipns/abc"), Some("abc"));
        assert_eq!(strip_naming_prefix("/ipfs/abc"), None);
        assert_eq!(strip_naming_prefix("ipns/abc"), None);
    }
}
