//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is below [`Price::MINIMUM`].
    #[error("price must be at least {min}")]
    BelowMinimum {
        /// Smallest accepted amount.
        min: Decimal,
    },
    /// The amount does not fit the stored `NUMERIC(12, 2)` column.
    #[error("Price must be less than {}", Price::UPPER_BOUND)]
    TooLarge,
    /// The amount has more than [`Price::MAX_SCALE`] decimal places.
    #[error("Price can have at most {} decimal places", Price::MAX_SCALE)]
    TooPrecise,
}

/// A product price in the store's currency unit (e.g. dollars, not cents).
///
/// Serialized as a decimal string (`"9.99"`) so no precision is lost
/// between the database, the API and clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Smallest price a product may carry.
    pub const MINIMUM: Decimal = Decimal::ONE;

    /// Exclusive upper bound, the first amount `NUMERIC(12, 2)` cannot hold.
    pub const UPPER_BOUND: i64 = 10_000_000_000;

    /// Most decimal places a price may carry (cents).
    pub const MAX_SCALE: u32 = 2;

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::BelowMinimum`] if `amount` is below [`Price::MINIMUM`],
    /// [`PriceError::TooLarge`] if it reaches [`Price::UPPER_BOUND`] and
    /// [`PriceError::TooPrecise`] if it has sub-cent digits.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Self::MINIMUM {
            return Err(PriceError::BelowMinimum { min: Self::MINIMUM });
        }
        if amount >= Decimal::from(Self::UPPER_BOUND) {
            return Err(PriceError::TooLarge);
        }
        let amount = amount.normalize();
        if amount.scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise);
        }
        Ok(Self(amount))
    }

    /// Parse a price from user input such as `"9.99"` or `" 12 "`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for non-numeric input and
    /// [`PriceError::BelowMinimum`] for amounts below the minimum.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// Wrap an amount that was already validated (e.g. read back from the database).
    #[must_use]
    pub const fn from_trusted(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimal places (e.g. `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let price = Price::parse("9.99").expect("valid price");
        assert_eq!(price.amount(), Decimal::new(999, 2));
        assert_eq!(price.display(), "$9.99");
    }

    #[test]
    fn test_parse_whole_number_display() {
        let price = Price::parse(" 12 ").expect("valid price");
        assert_eq!(price.display(), "$12.00");
    }

    #[test]
    fn test_parse_not_a_number() {
        assert_eq!(Price::parse("abc"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse(""), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_below_minimum() {
        assert!(matches!(
            Price::parse("0.5"),
            Err(PriceError::BelowMinimum { .. })
        ));
        assert!(matches!(
            Price::parse("-3"),
            Err(PriceError::BelowMinimum { .. })
        ));
        assert!(Price::parse("1").is_ok());
    }

    #[test]
    fn test_rejects_amounts_the_column_cannot_hold() {
        assert_eq!(Price::parse("10000000000"), Err(PriceError::TooLarge));
        assert_eq!(Price::parse("100000000000"), Err(PriceError::TooLarge));
        let largest = Price::parse("9999999999.99").expect("fits NUMERIC(12, 2)");
        assert_eq!(largest.amount(), Decimal::new(999_999_999_999, 2));
    }

    #[test]
    fn test_rejects_sub_cent_amounts() {
        assert_eq!(Price::parse("1.999"), Err(PriceError::TooPrecise));
        assert_eq!(
            Price::parse("1.990").expect("trailing zero").amount(),
            Decimal::new(199, 2)
        );
        assert_eq!(
            PriceError::TooPrecise.to_string(),
            "Price can have at most 2 decimal places"
        );
        assert_eq!(
            PriceError::TooLarge.to_string(),
            "Price must be less than 10000000000"
        );
    }

    #[test]
    fn test_serializes_as_string() {
        let price = Price::parse("19.90").expect("valid price");
        let json = serde_json::to_string(&price).expect("serializable");
        assert_eq!(json, "\"19.9\"");
    }
}
