//! Item input validation.
//!
//! # Rules
//! - `name`: required string, trimmed, 1..=100 characters after trimming
//! - `description`: optional string or `null`, at most 500 characters
//! - `price`: required number (or numeric string), finite, `0 < price <= 1_000_000`
//!
//! # Design Decisions
//! - Every violated constraint is reported, not just the first, type
//!   mismatches included
//! - Operates on the untyped `NewItem` so a wrong-typed field never hides a
//!   violation in another field
//! - Never produces a partially valid item

use serde_json::Value;

use crate::items::model::{NewItem, ValidItem};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const PRICE_MAX: f64 = 1_000_000.0;

/// Which constraint a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Missing,
    StringType,
    FloatType,
    FloatParsing,
    StringTooShort,
    StringTooLong,
    GreaterThan,
    LessThanEqual,
    FiniteNumber,
}

impl ErrorKind {
    /// Wire name used in the `type` field of a 422 detail entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Missing => "missing",
            ErrorKind::StringType => "string_type",
            ErrorKind::FloatType => "float_type",
            ErrorKind::FloatParsing => "float_parsing",
            ErrorKind::StringTooShort => "string_too_short",
            ErrorKind::StringTooLong => "string_too_long",
            ErrorKind::GreaterThan => "greater_than",
            ErrorKind::LessThanEqual => "less_than_equal",
            ErrorKind::FiniteNumber => "finite_number",
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    pub kind: ErrorKind,
}

impl FieldError {
    fn new(field: &'static str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            kind,
        }
    }

    fn missing(field: &'static str) -> Self {
        Self::new(field, ErrorKind::Missing, "Field required")
    }

    fn not_a_string(field: &'static str) -> Self {
        Self::new(field, ErrorKind::StringType, "Input should be a valid string")
    }
}

/// All field failures found for one input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a raw create-item payload.
pub fn validate_new_item(input: NewItem) -> Result<ValidItem, ValidationErrors> {
    let mut errors = Vec::new();

    let name = check_name(input.name, &mut errors);
    let description = check_description(input.description, &mut errors);
    let price = check_price(input.price, &mut errors);

    match (name, description, price) {
        (Some(name), Some(description), Some(price)) if errors.is_empty() => Ok(ValidItem {
            name,
            description,
            price,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn check_name(value: Option<Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    let raw = match value {
        None => {
            errors.push(FieldError::missing("name"));
            return None;
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            errors.push(FieldError::not_a_string("name"));
            return None;
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(
            "name",
            ErrorKind::StringTooShort,
            "Name cannot be empty or whitespace",
        ));
        None
    } else if trimmed.chars().count() > NAME_MAX_CHARS {
        errors.push(FieldError::new(
            "name",
            ErrorKind::StringTooLong,
            format!("String should have at most {} characters", NAME_MAX_CHARS),
        ));
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `Some(None)` is a valid absent description; `None` means it failed.
fn check_description(
    value: Option<Value>,
    errors: &mut Vec<FieldError>,
) -> Option<Option<String>> {
    match value {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) if s.chars().count() > DESCRIPTION_MAX_CHARS => {
            errors.push(FieldError::new(
                "description",
                ErrorKind::StringTooLong,
                format!(
                    "String should have at most {} characters",
                    DESCRIPTION_MAX_CHARS
                ),
            ));
            None
        }
        Some(Value::String(s)) => Some(Some(s)),
        Some(_) => {
            errors.push(FieldError::not_a_string("description"));
            None
        }
    }
}

fn check_price(value: Option<Value>, errors: &mut Vec<FieldError>) -> Option<f64> {
    let price = match value {
        None => {
            errors.push(FieldError::missing("price"));
            return None;
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(p) => Some(p),
            Err(_) => {
                errors.push(FieldError::new(
                    "price",
                    ErrorKind::FloatParsing,
                    "Input should be a valid number, unable to parse string as a number",
                ));
                return None;
            }
        },
        Some(_) => None,
    };

    let Some(price) = price else {
        errors.push(FieldError::new(
            "price",
            ErrorKind::FloatType,
            "Input should be a valid number",
        ));
        return None;
    };

    if !price.is_finite() {
        errors.push(FieldError::new(
            "price",
            ErrorKind::FiniteNumber,
            "Input should be a finite number",
        ));
        None
    } else if price <= 0.0 {
        errors.push(FieldError::new(
            "price",
            ErrorKind::GreaterThan,
            "Input should be greater than 0",
        ));
        None
    } else if price > PRICE_MAX {
        errors.push(FieldError::new(
            "price",
            ErrorKind::LessThanEqual,
            format!("Input should be less than or equal to {}", PRICE_MAX),
        ));
        None
    } else {
        Some(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(name: Option<&str>, description: Option<&str>, price: Option<f64>) -> NewItem {
        NewItem {
            name: name.map(Value::from),
            description: description.map(Value::from),
            price: price.map(Value::from),
        }
    }

    fn from_json(value: Value) -> NewItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_item() {
        let valid = validate_new_item(input(Some("Test Item"), Some("A test item"), Some(29.99)))
            .unwrap();
        assert_eq!(valid.name(), "Test Item");
        assert_eq!(valid.description(), Some("A test item"));
        assert_eq!(valid.price(), 29.99);
    }

    #[test]
    fn test_name_is_trimmed() {
        let valid = validate_new_item(input(Some("  padded  "), None, Some(1.0))).unwrap();
        assert_eq!(valid.name(), "padded");
    }

    #[test]
    fn test_empty_and_whitespace_names_rejected() {
        for name in ["", "   ", "\t\n"] {
            let errs = validate_new_item(input(Some(name), None, Some(1.0))).unwrap_err();
            assert_eq!(errs.fields().collect::<Vec<_>>(), vec!["name"]);
            assert_eq!(errs.errors()[0].kind, ErrorKind::StringTooShort);
        }
    }

    #[test]
    fn test_name_length_counts_after_trim() {
        let exactly_max = format!("  {}  ", "a".repeat(NAME_MAX_CHARS));
        assert!(validate_new_item(input(Some(&exactly_max), None, Some(1.0))).is_ok());

        let too_long = "a".repeat(NAME_MAX_CHARS + 1);
        let errs = validate_new_item(input(Some(&too_long), None, Some(1.0))).unwrap_err();
        assert_eq!(errs.errors()[0].kind, ErrorKind::StringTooLong);
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        let name = "é".repeat(NAME_MAX_CHARS);
        assert!(validate_new_item(input(Some(&name), None, Some(1.0))).is_ok());
    }

    #[test]
    fn test_description_limit() {
        let ok = "d".repeat(DESCRIPTION_MAX_CHARS);
        assert!(validate_new_item(input(Some("n"), Some(&ok), Some(1.0))).is_ok());

        let too_long = "d".repeat(DESCRIPTION_MAX_CHARS + 1);
        let errs = validate_new_item(input(Some("n"), Some(&too_long), Some(1.0))).unwrap_err();
        assert_eq!(errs.fields().collect::<Vec<_>>(), vec!["description"]);
    }

    #[test]
    fn test_null_description_is_absent() {
        let valid =
            validate_new_item(from_json(json!({"name": "n", "description": null, "price": 1})))
                .unwrap();
        assert_eq!(valid.description(), None);
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_new_item(input(Some("n"), None, Some(PRICE_MAX))).is_ok());
        assert!(validate_new_item(input(Some("n"), None, Some(0.01))).is_ok());

        let cases = [
            (json!(0), ErrorKind::GreaterThan),
            (json!(-10.0), ErrorKind::GreaterThan),
            (json!(PRICE_MAX + 0.01), ErrorKind::LessThanEqual),
            (json!("NaN"), ErrorKind::FiniteNumber),
            (json!("inf"), ErrorKind::FiniteNumber),
        ];
        for (price, kind) in cases {
            let errs = validate_new_item(from_json(json!({"name": "n", "price": price})))
                .unwrap_err();
            assert_eq!(errs.errors().len(), 1, "price {price}");
            assert_eq!(errs.errors()[0].kind, kind, "price {price}");
        }
    }

    #[test]
    fn test_numeric_string_price_accepted() {
        let valid =
            validate_new_item(from_json(json!({"name": "n", "price": " 12.50 "}))).unwrap();
        assert_eq!(valid.price(), 12.5);
    }

    #[test]
    fn test_wrong_types_are_field_errors() {
        let errs = validate_new_item(from_json(json!({
            "name": 42,
            "description": ["not", "text"],
            "price": true
        })))
        .unwrap_err();

        let kinds: Vec<_> = errs.errors().iter().map(|e| (e.field, e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("name", ErrorKind::StringType),
                ("description", ErrorKind::StringType),
                ("price", ErrorKind::FloatType),
            ]
        );
    }

    #[test]
    fn test_type_error_does_not_hide_other_fields() {
        let errs =
            validate_new_item(from_json(json!({"name": "   ", "price": "cheap"}))).unwrap_err();

        let kinds: Vec<_> = errs.errors().iter().map(|e| (e.field, e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("name", ErrorKind::StringTooShort),
                ("price", ErrorKind::FloatParsing),
            ]
        );
    }

    #[test]
    fn test_null_required_fields_are_type_errors() {
        let errs =
            validate_new_item(from_json(json!({"name": null, "price": null}))).unwrap_err();
        assert_eq!(errs.errors()[0].kind, ErrorKind::StringType);
        assert_eq!(errs.errors()[1].kind, ErrorKind::FloatType);
    }

    #[test]
    fn test_reports_every_violation() {
        let long_description = "d".repeat(DESCRIPTION_MAX_CHARS + 1);
        let errs = validate_new_item(input(Some(" "), Some(&long_description), Some(-1.0)))
            .unwrap_err();
        assert_eq!(
            errs.fields().collect::<Vec<_>>(),
            vec!["name", "description", "price"]
        );
    }

    #[test]
    fn test_missing_fields() {
        let errs = validate_new_item(NewItem::default()).unwrap_err();
        assert!(errs.errors().iter().all(|e| e.kind == ErrorKind::Missing));
        assert_eq!(errs.fields().collect::<Vec<_>>(), vec!["name", "price"]);
    }

    #[test]
    fn test_display_joins_fields() {
        let errs = validate_new_item(input(None, None, Some(-1.0))).unwrap_err();
        assert_eq!(
            errs.to_string(),
            "name: Field required, price: Input should be greater than 0"
        );
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(ErrorKind::StringType.as_str(), "string_type");
        assert_eq!(ErrorKind::FloatParsing.as_str(), "float_parsing");
        assert_eq!(ErrorKind::LessThanEqual.as_str(), "less_than_equal");
    }
}
