//! Field-level validation helpers for catalog input DTOs.
//!
//! The DTOs themselves live in the `db` crate and derive
//! [`validator::Validate`]; the custom rules they reference and the
//! conversion into a serializable per-field message map live here.

use std::borrow::Cow;
use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Upper bound for a product price (`NUMERIC(10, 2)`).
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Number of decimal places prices are stored with.
pub const PRICE_SCALE: u32 = 2;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 50;

/// Maximum number of tags on one product.
pub const MAX_TAGS: usize = 20;

/// Per-field validation messages, keyed by field name.
///
/// Serializes as a plain JSON object: `{"name": ["The name field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map holding a single message for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Append every message from `other`.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

/// A body field that either decoded as `T` or is kept as the raw JSON
/// value, so a type mismatch is reported on its own field instead of
/// rejecting the whole body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(serde_json::Value),
}

impl<T> Lenient<T> {
    /// The decoded value, or `None` after recording `message` under `field`.
    pub fn accept(
        value: Option<Self>,
        field: &str,
        message: &str,
        errors: &mut FieldErrors,
    ) -> Option<T> {
        match value? {
            Lenient::Valid(v) => Some(v),
            Lenient::Invalid(raw) => {
                tracing::debug!(field, value = %raw, "Rejected field of the wrong type");
                errors.add(field, message);
                None
            }
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, kind) in errors.errors() {
            if let ValidationErrorsKind::Field(list) = kind {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {field} field is invalid."));
                    out.add(field.to_string(), message);
                }
            }
        }
        out
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Rejects names that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "The name field is required."));
    }
    Ok(())
}

/// Price must be non-negative and fit `NUMERIC(10, 2)`.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(error("min", "The price field must be at least 0."));
    }
    if normalize_price(*price) > MAX_PRICE {
        return Err(error(
            "max",
            "The price field must not be greater than 99999999.99.",
        ));
    }
    Ok(())
}

/// Tags must be short, non-blank strings, and not too many of them.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(error("max_items", "The tags field must not have more than 20 items."));
    }
    for tag in tags {
        if tag.trim().is_empty() {
            return Err(error("blank_tag", "Each tag must be a non-empty string."));
        }
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(error(
                "tag_length",
                "Each tag must not be greater than 50 characters.",
            ));
        }
    }
    Ok(())
}

/// Round a price to the stored precision, half away from zero like `NUMERIC`.
pub fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
