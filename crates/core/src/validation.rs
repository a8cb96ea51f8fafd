//! Field-level validation.
//!
//! Every write payload declares a schema - a static list of [`FieldSpec`]s -
//! and validates itself through a [`Validator`] that records one
//! [`FieldError`] per failing field. Validation is pure: it never touches the
//! network or the database, so both the server and the client run the same
//! checks before anything is persisted or sent.
//!
//! The schema doubles as rendering metadata: the dashboard derives the HTML
//! `required`, `minlength`, `min` and `pattern` attributes from it.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{HexColor, Price};

/// A constraint attached to one input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Trimmed string with at least this many characters.
    MinLength(usize),
    /// Required id of another entity in the same store.
    Reference,
    /// Number no smaller than the given minimum.
    MinNumber(i64),
    /// String matching [`HexColor::PATTERN`].
    HexColor,
    /// List with at least one entry.
    NonEmptyList,
    /// Boolean, `false` when absent.
    Flag,
}

impl Constraint {
    /// Whether a form must provide a value for this field.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !matches!(self, Self::Flag)
    }

    /// Regex pattern for HTML `pattern` attributes, if any.
    #[must_use]
    pub const fn pattern(&self) -> Option<&'static str> {
        match self {
            Self::HexColor => Some(HexColor::PATTERN),
            _ => None,
        }
    }
}

/// Schema entry: a named field, its constraint, and the message shown when
/// the constraint is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field (camelCase, as in JSON and form posts).
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Constraint to enforce.
    pub constraint: Constraint,
    /// Message reported on violation.
    pub message: &'static str,
}

impl FieldSpec {
    /// Create a schema entry.
    #[must_use]
    pub const fn new(
        name: &'static str,
        label: &'static str,
        constraint: Constraint,
        message: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            constraint,
            message,
        }
    }
}

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the failing field.
    pub field: String,
    /// User-facing message.
    pub message: String,
}

/// All field errors of one submission.
///
/// Serializes as `{"errors":[{"field":"name","message":"..."}]}`, which is
/// also the body of a `422 Unprocessable Entity` API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create an error set with a single entry.
    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Record an error for `field`.
    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_owned(),
            message: message.to_owned(),
        });
    }

    /// Returns true if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over recorded errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First message recorded for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// A payload that can be checked against its schema.
pub trait Validate {
    /// The typed, checked form of the payload.
    type Valid;

    /// The payload's schema, in form order.
    fn schema() -> &'static [FieldSpec];

    /// Check the payload.
    ///
    /// # Errors
    ///
    /// Returns every failing field; never partially succeeds.
    fn validate(&self) -> Result<Self::Valid, ValidationErrors>;
}

/// A number as submitted by a client: JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    /// A JSON number.
    Number(f64),
    /// A string such as `"9.99"`, as sent by HTML forms.
    Text(String),
}

impl NumberInput {
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            Self::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }
}

impl From<Decimal> for NumberInput {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

/// Collects field errors while a payload is checked field by field.
///
/// Each check returns `Some(value)` when the field passes and `None` after
/// recording an error, so callers can destructure all results at the end
/// and fall back to [`Validator::into_errors`] on any `None`.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    /// Start a new validation pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a text field against `MinLength` or `HexColor`.
    pub fn text(&mut self, spec: &FieldSpec, value: &str) -> Option<String> {
        let value = value.trim();
        let ok = match spec.constraint {
            Constraint::MinLength(min) => value.chars().count() >= min,
            Constraint::HexColor => HexColor::is_valid(value),
            _ => !value.is_empty(),
        };
        self.check(spec, ok).then(|| value.to_owned())
    }

    /// Check a required reference and parse it into a typed id.
    pub fn reference<T: FromStr>(&mut self, spec: &FieldSpec, value: &str) -> Option<T> {
        let parsed = value.trim().parse::<T>().ok();
        self.check(spec, parsed.is_some());
        parsed
    }

    /// Check a number against `MinNumber`.
    pub fn number(&mut self, spec: &FieldSpec, value: Option<&NumberInput>) -> Option<Decimal> {
        let min = match spec.constraint {
            Constraint::MinNumber(min) => Decimal::from(min),
            _ => Decimal::ZERO,
        };
        let parsed = value
            .and_then(NumberInput::to_decimal)
            .filter(|n| *n >= min);
        self.check(spec, parsed.is_some());
        parsed
    }

    /// Check a price: the field's minimum first, then what [`Price::new`]
    /// enforces (upper bound, cents precision) with its own message.
    pub fn price(&mut self, spec: &FieldSpec, value: Option<&NumberInput>) -> Option<Price> {
        let amount = self.number(spec, value)?;
        Price::new(amount)
            .map_err(|err| self.errors.push(spec.name, &err.to_string()))
            .ok()
    }

    /// Check that a list has at least one entry.
    pub fn non_empty<T>(&mut self, spec: &FieldSpec, items: &[T]) -> bool {
        self.check(spec, !items.is_empty())
    }

    /// Record the field's message unless `ok`. Returns `ok`.
    pub fn check(&mut self, spec: &FieldSpec, ok: bool) -> bool {
        if !ok {
            self.errors.push(spec.name, spec.message);
        }
        ok
    }

    /// Returns true if nothing failed so far.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish the pass, returning the recorded errors.
    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillboardId;

    const NAME: FieldSpec = FieldSpec::new(
        "name",
        "Name",
        Constraint::MinLength(1),
        "Name must be at least 1 character long",
    );
    const PRICE: FieldSpec = FieldSpec::new(
        "price",
        "Price",
        Constraint::MinNumber(1),
        "Price must be at least 1",
    );
    const BILLBOARD: FieldSpec = FieldSpec::new(
        "billboardId",
        "Billboard",
        Constraint::Reference,
        "Billboard is required",
    );

    #[test]
    fn test_text_trims_and_checks_length() {
        let mut v = Validator::new();
        assert_eq!(v.text(&NAME, "  Shirts "), Some("Shirts".to_string()));
        assert!(v.is_ok());

        assert_eq!(v.text(&NAME, "   "), None);
        let errors = v.into_errors();
        assert_eq!(
            errors.for_field("name"),
            Some("Name must be at least 1 character long")
        );
    }

    #[test]
    fn test_reference_requires_parseable_id() {
        let mut v = Validator::new();
        assert!(v.reference::<BillboardId>(&BILLBOARD, "").is_none());
        assert!(v.reference::<BillboardId>(&BILLBOARD, "nope").is_none());
        let id = BillboardId::generate();
        assert_eq!(
            v.reference::<BillboardId>(&BILLBOARD, &id.to_string()),
            Some(id)
        );
        assert_eq!(v.into_errors().len(), 2);
    }

    #[test]
    fn test_number_minimum() {
        let mut v = Validator::new();
        assert_eq!(
            v.number(&PRICE, Some(&NumberInput::Number(9.99))),
            Some(Decimal::new(999, 2))
        );
        assert_eq!(
            v.number(&PRICE, Some(&NumberInput::Text("12".to_string()))),
            Some(Decimal::from(12))
        );
        assert!(v.is_ok());

        assert_eq!(v.number(&PRICE, Some(&NumberInput::Number(0.5))), None);
        assert_eq!(v.number(&PRICE, Some(&NumberInput::Text("x".to_string()))), None);
        assert_eq!(v.number(&PRICE, None), None);
        assert_eq!(v.into_errors().len(), 3);
    }

    #[test]
    fn test_price_bounds_are_field_errors() {
        let mut v = Validator::new();
        assert_eq!(
            v.price(&PRICE, Some(&NumberInput::Number(9_999_999_999.99)))
                .map(|p| p.amount()),
            Some(Decimal::new(999_999_999_999, 2))
        );
        assert!(v.is_ok());

        assert!(v.price(&PRICE, Some(&NumberInput::Number(1e11))).is_none());
        let errors = v.into_errors();
        assert_eq!(
            errors.for_field("price"),
            Some("Price must be less than 10000000000")
        );

        let mut v = Validator::new();
        assert!(v.price(&PRICE, Some(&NumberInput::Number(1.999))).is_none());
        assert!(v.price(&PRICE, Some(&NumberInput::Number(0.5))).is_none());
        let errors = v.into_errors();
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            ["Price can have at most 2 decimal places", "Price must be at least 1"]
        );
    }

    #[test]
    fn test_number_input_deserializes_both_forms() {
        let n: NumberInput = serde_json::from_str("9.5").expect("number");
        assert_eq!(n, NumberInput::Number(9.5));
        let s: NumberInput = serde_json::from_str("\"9.5\"").expect("string");
        assert_eq!(s, NumberInput::Text("9.5".to_string()));
    }

    #[test]
    fn test_errors_serialize_shape() {
        let errors = ValidationErrors::single("value", "String must be a valid hex code");
        let json = serde_json::to_value(&errors).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "errors": [{"field": "value", "message": "String must be a valid hex code"}]
            })
        );
        assert_eq!(errors.to_string(), "invalid fields: value");
    }

    #[test]
    fn test_constraint_metadata() {
        assert!(Constraint::Reference.is_required());
        assert!(!Constraint::Flag.is_required());
        assert_eq!(Constraint::HexColor.pattern(), Some(HexColor::PATTERN));
        assert_eq!(Constraint::MinLength(1).pattern(), None);
    }
}
