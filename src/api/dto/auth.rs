//! DTOs for the authentication endpoints.

use serde::Serialize;
use validator::Validate;

use crate::domain::entities::User;
use crate::domain::validation::{FieldErrors, RawFields, secret_field, string_field};

/// Login body as read from the request.
#[derive(Debug, Validate)]
pub struct LoginRequest {
    #[validate(required, email, length(max = 255))]
    pub email: Option<String>,

    #[validate(required)]
    pub password: Option<String>,
}

/// Login body that passed the field rules.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Reads and validates a login body.
    ///
    /// # Errors
    ///
    /// Returns every field violation at once.
    pub fn parse(raw: &RawFields) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let request = LoginRequest {
            email: string_field(raw, "email", &mut errors),
            password: secret_field(raw, "password", &mut errors),
        };

        if let Err(violations) = request.validate() {
            errors.merge(violations.into());
        }
        errors.into_result()?;

        Ok(Credentials {
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        })
    }
}

/// Successful login: `{status, user, token}`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: bool,
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn raw(value: Value) -> RawFields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_valid() {
        let credentials =
            LoginRequest::parse(&raw(json!({"email": " admin@example.com ", "password": "pw"})))
                .unwrap();

        assert_eq!(credentials.email, "admin@example.com");
        assert_eq!(credentials.password, "pw");
    }

    #[test]
    fn test_parse_missing_fields() {
        let errors = LoginRequest::parse(&raw(json!({}))).unwrap_err();

        assert_eq!(
            errors.get("email"),
            Some(&["The email field is required.".to_string()][..])
        );
        assert_eq!(
            errors.get("password"),
            Some(&["The password field is required.".to_string()][..])
        );
    }

    #[test]
    fn test_parse_malformed_email() {
        let errors =
            LoginRequest::parse(&raw(json!({"email": "nope", "password": "pw"}))).unwrap_err();

        assert!(errors.contains("email"));
        assert!(!errors.contains("password"));
    }
}
