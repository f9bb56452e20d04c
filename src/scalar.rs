//! Scalar type inference for raw values.
//!
//! Given the text after the `:` (or a quoted flag from the classifier),
//! decides which [`RowType`] a row gets and how its value is stored.
//! Numeric detection goes through [`rust_decimal`] so it is exact and
//! locale-independent (`.` decimal separator only).

use crate::row::RowType;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Classify a raw scalar and normalize its stored form.
///
/// The order of the rules matters: quoting short-circuits every literal
/// test, and emptiness is checked before the numeric/boolean/null literals
/// so that an unquoted empty value always means "nested mapping follows"
/// while a quoted empty string (`key: ""`) stays a string.
///
/// # Examples
///
/// ```
/// use caraway::{scalar, RowType};
///
/// assert_eq!(scalar::infer("3.14", false), (RowType::Numeric, "3.14".to_string()));
/// assert_eq!(scalar::infer("Yes", false), (RowType::Boolean, "1".to_string()));
/// assert_eq!(scalar::infer("~", false), (RowType::Null, String::new()));
/// assert_eq!(scalar::infer("42", true), (RowType::String, "42".to_string()));
/// assert_eq!(scalar::infer("", false), (RowType::Parent, String::new()));
/// ```
pub fn infer(raw: &str, quoted: bool) -> (RowType, String) {
    if quoted {
        return (RowType::String, raw.to_string());
    }
    if raw.is_empty() {
        return (RowType::Parent, String::new());
    }
    if is_numeric(raw) {
        return (RowType::Numeric, raw.to_string());
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" => return (RowType::Boolean, "1".to_string()),
        "false" | "no" => return (RowType::Boolean, "0".to_string()),
        "null" | "~" => return (RowType::Null, String::new()),
        _ => {}
    }
    (RowType::String, raw.to_string())
}

/// Whether `raw` reads as an integer or decimal number.
pub fn is_numeric(raw: &str) -> bool {
    Decimal::from_str(raw).is_ok()
}

/// True when a string value would re-parse as a different type and must be
/// quoted by the serializer to survive a round trip.
pub fn needs_quoting(value: &str) -> bool {
    if value.is_empty() || is_numeric(value) {
        return true;
    }
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "false" | "no" | "null" | "~"
    ) || value.starts_with('"')
        || value.starts_with('\'')
}

#[test]
fn test_inference_table() {
    assert_eq!(infer("true", false), (RowType::Boolean, "1".into()));
    assert_eq!(infer("No", false), (RowType::Boolean, "0".into()));
    assert_eq!(infer("~", false), (RowType::Null, "".into()));
    assert_eq!(infer("3.14", false), (RowType::Numeric, "3.14".into()));
    assert_eq!(infer("42", true), (RowType::String, "42".into()));
    assert_eq!(infer("hello", false), (RowType::String, "hello".into()));
}

#[test]
fn test_quoted_empty_string_is_string_not_parent() {
    assert_eq!(infer("", true), (RowType::String, "".into()));
}
