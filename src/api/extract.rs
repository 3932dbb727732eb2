//! Request extractors shared by the handlers.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
};
use serde_json::Value;

use crate::domain::validation::{FieldErrors, RawFields};
use crate::error::AppError;

/// Request body read as a raw JSON object.
///
/// Unlike `Json<T>`, this never rejects on missing fields or wrong field
/// types; those are reported by the field rules. An empty body yields an
/// empty map. Anything that is not a JSON object is a validation error keyed
/// `body`.
///
/// Handlers that must check something before looking at the body take
/// `Result<Bytes, BytesRejection>` instead and call [`JsonFields::from_body`].
#[derive(Debug, Clone)]
pub struct JsonFields(pub RawFields);

impl JsonFields {
    /// Parses a body that was extracted as raw bytes.
    pub fn from_body(body: Result<Bytes, BytesRejection>) -> Result<Self, AppError> {
        let bytes = body.map_err(|_| unreadable_body())?;
        parse_fields(&bytes).map(JsonFields)
    }
}

impl<S> FromRequest<S> for JsonFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Self::from_body(Bytes::from_request(req, state).await)
    }
}

fn parse_fields(bytes: &[u8]) -> Result<RawFields, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawFields::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(body_error("The request body must be a JSON object.")),
    }
}

fn unreadable_body() -> AppError {
    body_error("The request body could not be read.")
}

fn body_error(message: &str) -> AppError {
    AppError::validation(FieldErrors::single("body", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_empty_map() {
        assert!(parse_fields(b"").unwrap().is_empty());
        assert!(parse_fields(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn test_object_body() {
        let fields = parse_fields(br#"{"name": "France", "extra": 1}"#).unwrap();

        assert_eq!(fields["name"], "France");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_from_body_parses_bytes() {
        let JsonFields(fields) =
            JsonFields::from_body(Ok(Bytes::from_static(br#"{"title": "Bridge"}"#))).unwrap();

        assert_eq!(fields["title"], "Bridge");
    }

    #[test]
    fn test_non_object_body_rejected() {
        for body in [&b"[1, 2]"[..], b"\"text\"", b"{not json"] {
            match parse_fields(body) {
                Err(AppError::Validation { errors }) => assert!(errors.contains("body")),
                other => panic!("expected body error, got {other:?}"),
            }
        }
    }
}
