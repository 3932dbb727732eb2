//! Application error type and its HTTP rendering.
//!
//! Every error leaves the service as the uniform envelope:
//!
//! ```json
//! { "status": false, "errors": { "name": ["The name field is required."] } }
//! { "status": false, "message": "Membre not found" }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::validation::{FieldErrors, taken_message};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input failed field rules (400).
    #[error("validation failed")]
    Validation { errors: FieldErrors },

    /// Requested record does not exist (404).
    #[error("{message}")]
    NotFound { message: String },

    /// Missing, unknown or revoked credentials (401).
    #[error("{message}")]
    Unauthorized { message: String },

    /// Storage or other unexpected failure (500). `details` are logged only.
    #[error("{message}: {details}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { errors } => ErrorEnvelope {
                status: false,
                message: None,
                errors: Some(errors),
            },
            AppError::NotFound { message } | AppError::Unauthorized { message } => ErrorEnvelope {
                status: false,
                message: Some(message),
                errors: None,
            },
            AppError::Internal { message, details } => {
                tracing::error!(%details, "{message}");
                ErrorEnvelope {
                    status: false,
                    message: Some("Server Error".to_string()),
                    errors: None,
                }
            }
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "error": e.to_string() }))
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::validation(errors)
    }
}

/// Maps a write error on `table`, turning a unique violation into a field error.
///
/// Constraints follow the PostgreSQL default naming `{table}_{column}_key`,
/// which is how the migrations declare them.
pub fn map_write_error(table: &str, e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
        && let Some(field) = db
            .constraint()
            .and_then(|c| c.strip_prefix(table))
            .and_then(|c| c.strip_prefix('_'))
            .and_then(|c| c.strip_suffix("_key"))
    {
        return AppError::validation(FieldErrors::single(field, taken_message(field)));
    }

    e.into()
}
