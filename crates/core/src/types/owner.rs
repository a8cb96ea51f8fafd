//! Store owner identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OwnerId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnerIdError {
    /// The input string is empty (after trimming).
    #[error("owner id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("owner id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains control characters.
    #[error("owner id cannot contain control characters")]
    ControlCharacter,
}

/// Identity of a store owner, as supplied by the authenticating proxy.
///
/// Storedash never issues these itself; the value is whatever stable user
/// identifier the upstream identity provider puts in the identity header.
///
/// ## Constraints
///
/// - Length: 1-255 characters after trimming
/// - No control characters
///
/// ## Examples
///
/// ```
/// use storedash_core::OwnerId;
///
/// assert!(OwnerId::parse("user_2abc").is_ok());
/// assert_eq!(OwnerId::parse("  user_2abc ").unwrap().as_str(), "user_2abc");
///
/// assert!(OwnerId::parse("").is_err());
/// assert!(OwnerId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Maximum length of an owner id.
    pub const MAX_LENGTH: usize = 255;

    /// Parse an `OwnerId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// 255 characters, or contains control characters.
    pub fn parse(s: &str) -> Result<Self, OwnerIdError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(OwnerIdError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(OwnerIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_control) {
            return Err(OwnerIdError::ControlCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the owner id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OwnerId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OwnerId {
    type Err = OwnerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let owner = OwnerId::parse("user_2abc").expect("valid owner");
        assert_eq!(owner.as_str(), "user_2abc");
        assert_eq!(owner.to_string(), "user_2abc");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(OwnerId::parse(""), Err(OwnerIdError::Empty));
        assert_eq!(OwnerId::parse(" \t "), Err(OwnerIdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(OwnerId::MAX_LENGTH + 1);
        assert!(matches!(
            OwnerId::parse(&long),
            Err(OwnerIdError::TooLong { .. })
        ));
        assert!(OwnerId::parse(&"a".repeat(OwnerId::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_parse_control_characters() {
        assert_eq!(
            OwnerId::parse("user\u{0}1"),
            Err(OwnerIdError::ControlCharacter)
        );
    }
}
