//! Handlers for login, logout and the current user.

use axum::{Extension, Json, extract::State};

use crate::api::dto::auth::{LoginRequest, LoginResponse};
use crate::api::dto::envelope::Envelope;
use crate::api::extract::JsonFields;
use crate::application::services::AuthContext;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.com", "password": "secret" }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: `{status, user, token}`; the token is shown only here
/// - **400 Bad Request**: malformed input
/// - **401 Unauthorized**: `Invalid credentials`, for an unknown email and a
///   wrong password alike
pub async fn login_handler(
    State(state): State<AppState>,
    JsonFields(raw): JsonFields,
) -> Result<Json<LoginResponse>, AppError> {
    let credentials = LoginRequest::parse(&raw)?;

    let issued = state
        .auth_service
        .login(&credentials.email, &credentials.password)
        .await?;

    Ok(Json(LoginResponse {
        status: true,
        user: issued.user,
        token: issued.token,
    }))
}

/// Revokes the bearer token that authenticated this request.
///
/// # Endpoint
///
/// `POST /auth/logout` (Bearer token required)
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Envelope<()>>, AppError> {
    state.auth_service.logout(&context).await?;
    Ok(Json(Envelope::message("User successfully logged out")))
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /user` (Bearer token required)
pub async fn user_handler(Extension(context): Extension<AuthContext>) -> Json<User> {
    Json(context.user)
}
