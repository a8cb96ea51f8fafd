//! Hex color values.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HexColor::PATTERN).expect("Invalid regex"));

/// Error returned when a string is not a hex color.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a hex color such as #ff0000")]
pub struct HexColorError(pub String);

/// A CSS hex color in short (`#f00`) or long (`#ff0000`) form.
///
/// ```
/// use storedash_core::HexColor;
///
/// assert!(HexColor::parse("#ff0000").is_ok());
/// assert!(HexColor::parse("#F00").is_ok());
/// assert!(HexColor::parse("red").is_err());
/// assert!(HexColor::parse("#ff00").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// The pattern every color value must match.
    pub const PATTERN: &'static str = r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

    /// Parse a hex color, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`HexColorError`] if the input does not match [`HexColor::PATTERN`].
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let s = s.trim();
        if Self::is_valid(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(HexColorError(s.to_owned()))
        }
    }

    /// Returns true if `s` is a hex color.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        HEX_COLOR_RE.is_match(s)
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_short_and_long_forms() {
        assert!(HexColor::parse("#ff0000").is_ok());
        assert!(HexColor::parse("#ABCDEF").is_ok());
        assert!(HexColor::parse("#0f0").is_ok());
        assert_eq!(HexColor::parse(" #123456 ").expect("valid").as_str(), "#123456");
    }

    #[test]
    fn test_rejects_names_and_bad_lengths() {
        assert!(HexColor::parse("red").is_err());
        assert!(HexColor::parse("ff0000").is_err());
        assert!(HexColor::parse("#ff00").is_err());
        assert!(HexColor::parse("#ggg").is_err());
        assert!(HexColor::parse("").is_err());
    }
}
