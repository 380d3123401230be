//! Field-keyed validation errors.
//!
//! Request validation reports every violated rule at once, keyed by the
//! dotted path of the offending field (`guest_info.email`, `materials.2`).
//! Errors produced by `validator` derives are flattened into the same shape
//! so handlers can merge derive-level and domain-level failures.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Map of field path to human-readable messages, serialized as a plain object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field. Messages accumulate per field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// The first message in field order, used as the summary line.
    pub fn first_message(&self) -> Option<&str> {
        self.0
            .values()
            .next()
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise [`CoreError::InvalidFields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }

    /// Build a single-field error map.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Flatten `validator` output into dotted field paths.
    pub fn from_validator(errors: &ValidationErrors) -> Self {
        let mut out = Self::new();
        collect(None, errors, &mut out);
        out
    }

    /// Attribute a path-prefixed deserialization failure
    /// (`total_price: invalid type: ...`) to the field it names.
    ///
    /// Returns `None` when the failure is not tied to a field, e.g. the body
    /// is not an object at all.
    pub fn from_deserialize_error(detail: &str) -> Option<Self> {
        let (path, reason) = detail.split_once(": ")?;
        let field = field_path(path)?;
        let message = format!("The {field} field {}.", expectation(reason));
        Some(Self::single(field, message))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_message() {
            Some(message) => f.write_str(message),
            None => f.write_str("no field errors"),
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidFields(FieldErrors::from_validator(&errors))
    }
}

fn collect(prefix: Option<&str>, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.add(path.clone(), describe(&path, error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(Some(&format!("{path}.{index}")), inner, out);
                }
            }
        }
    }
}

/// Convert a serde path (`guest_info.email`, `materials[1]`) to the dotted
/// form used for field keys. Anything else is not a field path.
fn field_path(path: &str) -> Option<String> {
    let starts_like_field = path
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let field_chars = path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    if !starts_like_field || !field_chars {
        return None;
    }
    Some(path.replace('[', ".").replace(']', ""))
}

/// What the field should have been, read from serde's "expected ..." text.
fn expectation(reason: &str) -> &'static str {
    let expected = reason
        .split_once("expected ")
        .map_or("", |(_, expected)| expected);
    if expected.starts_with("a sequence") {
        "must be an array"
    } else if expected.starts_with("a Decimal") {
        "must be a number"
    } else if expected.starts_with('i') || expected.starts_with('u') {
        "must be an integer"
    } else if expected.starts_with("a boolean") {
        "must be true or false"
    } else if expected.starts_with("a string") {
        "must be a string"
    } else if expected.starts_with("struct") || expected.starts_with("a map") {
        "must be an object"
    } else {
        "is invalid"
    }
}

/// Render a `validator` error as a sentence naming the field.
fn describe(path: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let param = |name: &str| error.params.get(name).map(|v| v.to_string());
    match error.code.as_ref() {
        "required" => format!("The {path} field is required."),
        "email" => format!("The {path} field must be a valid email address."),
        "length" => match (param("min"), param("max")) {
            (_, Some(max)) => format!("The {path} field must not be greater than {max} characters."),
            (Some(min), None) => format!("The {path} field must have at least {min} items."),
            (None, None) => format!("The {path} field has an invalid length."),
        },
        _ => format!("The {path} field is invalid."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Contact {
        #[validate(email)]
        email: Option<String>,
    }

    #[derive(Validate)]
    struct Request {
        #[validate(required)]
        name: Option<String>,
        #[validate(nested)]
        contact: Option<Contact>,
    }

    #[test]
    fn flattens_nested_errors_into_dotted_paths() {
        let request = Request {
            name: None,
            contact: Some(Contact {
                email: Some("not-an-email".to_string()),
            }),
        };
        let errors = FieldErrors::from_validator(&request.validate().unwrap_err());

        assert_eq!(
            errors.get("name").unwrap(),
            ["The name field is required.".to_string()]
        );
        assert_eq!(
            errors.get("contact.email").unwrap(),
            ["The contact.email field must be a valid email address.".to_string()]
        );
    }

    #[test]
    fn first_message_follows_field_order() {
        let mut errors = FieldErrors::new();
        errors.add("total_price", "price");
        errors.add("materials", "materials");
        assert_eq!(errors.first_message(), Some("materials"));
    }

    #[test]
    fn merge_accumulates_messages() {
        let mut left = FieldErrors::single("phone", "taken");
        left.merge(FieldErrors::single("phone", "too long"));
        assert_eq!(left.get("phone").unwrap().len(), 2);
    }

    #[test]
    fn deserialize_errors_are_keyed_by_field() {
        let errors = FieldErrors::from_deserialize_error(
            "total_price: invalid value: string \"abc\", expected a Decimal type representing a fixed-point number",
        )
        .unwrap();
        assert_eq!(
            errors.get("total_price").unwrap(),
            ["The total_price field must be a number.".to_string()]
        );

        let errors = FieldErrors::from_deserialize_error(
            "materials: invalid type: string \"velvet\", expected a sequence",
        )
        .unwrap();
        assert_eq!(
            errors.get("materials").unwrap(),
            ["The materials field must be an array.".to_string()]
        );

        let errors = FieldErrors::from_deserialize_error(
            "estimated_days: invalid type: string \"five\", expected i32",
        )
        .unwrap();
        assert!(errors.contains("estimated_days"));
        assert_eq!(errors.first_message(), Some("The estimated_days field must be an integer."));
    }

    #[test]
    fn nested_and_indexed_paths_become_dotted() {
        let errors = FieldErrors::from_deserialize_error(
            "materials[1]: invalid type: integer `7`, expected a string",
        )
        .unwrap();
        assert_eq!(errors.first_message(), Some("The materials.1 field must be a string."));

        let errors = FieldErrors::from_deserialize_error(
            "guest_info.email: invalid type: boolean `true`, expected a string",
        )
        .unwrap();
        assert!(errors.contains("guest_info.email"));
    }

    #[test]
    fn errors_without_a_field_path_are_not_attributed() {
        assert!(FieldErrors::from_deserialize_error(
            "invalid type: sequence, expected struct PlaceOrderRequest"
        )
        .is_none());
        assert!(FieldErrors::from_deserialize_error("expected value at line 1 column 1").is_none());
    }

    #[test]
    fn empty_map_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("a", "b").into_result().is_err());
    }
}
