//! Field-rule checking shared by every resource and by login.
//!
//! Request bodies arrive as a raw JSON object ([`RawFields`]). Each rule table
//! reads the fields it recognizes with [`string_field`] / [`secret_field`],
//! runs the `validator` derive over the resulting input struct and collects
//! every violation into a [`FieldErrors`] map keyed by field name.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

/// Raw request body: the JSON object exactly as the client sent it.
pub type RawFields = Map<String, Value>;

/// Field name → human-readable violations.
///
/// Serializes as a plain JSON object, e.g.
/// `{"email": ["The email field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error map.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Merges `other` into `self`.
    ///
    /// A field that already failed (e.g. a type error) keeps its existing
    /// messages; rule violations for it are not stacked on top.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_insert(messages);
        }
    }

    /// Returns `Ok(())` when empty, otherwise the map itself as the error.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, violations) in errors.field_errors() {
            for violation in violations {
                out.add(field.to_string(), render_message(&field, violation));
            }
        }
        out
    }
}

/// Renders a `validator` violation as a user-facing sentence.
///
/// An explicit `message` on the rule wins over the code-based default.
fn render_message(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "required" => format!("The {field} field is required."),
        "email" => format!("The {field} field must be a valid email address."),
        "length" => match error.params.get("max") {
            Some(max) => format!("The {field} field must not be greater than {max} characters."),
            None => format!("The {field} field has an invalid length."),
        },
        _ => format!("The {field} field is invalid."),
    }
}

/// Message used for uniqueness violations, both pre-checked and raised by storage.
pub fn taken_message(field: &str) -> String {
    format!("The {field} has already been taken.")
}

/// Reads a trimmed string field.
///
/// - absent, `null`, or blank after trimming → `None`
/// - any non-string JSON value → `None` plus a type error in `errors`
pub fn string_field(raw: &RawFields, field: &str, errors: &mut FieldErrors) -> Option<String> {
    read_string(raw, field, errors)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reads a string field verbatim (no trimming); used for passwords.
pub fn secret_field(raw: &RawFields, field: &str, errors: &mut FieldErrors) -> Option<String> {
    read_string(raw, field, errors).filter(|s| !s.is_empty())
}

/// Trimmed string value of `field`, ignoring type errors.
///
/// Used by uniqueness checks that run alongside rule validation.
pub fn peek_string(raw: &RawFields, field: &str) -> Option<String> {
    match raw.get(field) {
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        _ => None,
    }
}

fn read_string(raw: &RawFields, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match raw.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.add(field, format!("The {field} field must be a string."));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    fn raw(value: Value) -> RawFields {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(required, length(max = 5))]
        name: Option<String>,
        #[validate(required, email)]
        email: Option<String>,
    }

    #[test]
    fn test_string_field_trims_and_drops_blank() {
        let raw = raw(json!({"a": "  hi  ", "b": "   ", "c": null}));
        let mut errors = FieldErrors::new();

        assert_eq!(string_field(&raw, "a", &mut errors), Some("hi".to_string()));
        assert_eq!(string_field(&raw, "b", &mut errors), None);
        assert_eq!(string_field(&raw, "c", &mut errors), None);
        assert_eq!(string_field(&raw, "missing", &mut errors), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_string_field_rejects_non_string() {
        let raw = raw(json!({"name": 42}));
        let mut errors = FieldErrors::new();

        assert_eq!(string_field(&raw, "name", &mut errors), None);
        assert_eq!(
            errors.get("name"),
            Some(&["The name field must be a string.".to_string()][..])
        );
    }

    #[test]
    fn test_secret_field_keeps_whitespace() {
        let raw = raw(json!({"password": " secret "}));
        let mut errors = FieldErrors::new();

        assert_eq!(
            secret_field(&raw, "password", &mut errors),
            Some(" secret ".to_string())
        );
    }

    #[test]
    fn test_validator_messages() {
        let sample = Sample {
            name: Some("toolong".to_string()),
            email: None,
        };

        let errors = FieldErrors::from(sample.validate().unwrap_err());

        assert_eq!(
            errors.get("name"),
            Some(&["The name field must not be greater than 5 characters.".to_string()][..])
        );
        assert_eq!(
            errors.get("email"),
            Some(&["The email field is required.".to_string()][..])
        );
    }

    #[test]
    fn test_invalid_email_message() {
        let sample = Sample {
            name: Some("ok".to_string()),
            email: Some("not-an-email".to_string()),
        };

        let errors = FieldErrors::from(sample.validate().unwrap_err());

        assert_eq!(
            errors.get("email"),
            Some(&["The email field must be a valid email address.".to_string()][..])
        );
    }

    #[test]
    fn test_merge_keeps_existing_field_errors() {
        let mut errors = FieldErrors::single("name", "The name field must be a string.");
        let mut other = FieldErrors::single("name", "The name field is required.");
        other.add("email", "The email field is required.");

        errors.merge(other);

        assert_eq!(errors.get("name").map(<[String]>::len), Some(1));
        assert!(errors.contains("email"));
    }

    #[test]
    fn test_serializes_as_object() {
        let errors = FieldErrors::single("title", "The title field is required.");

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"title": ["The title field is required."]})
        );
    }
}
