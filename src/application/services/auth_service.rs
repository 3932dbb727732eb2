//! Authentication service: login, bearer token validation and logout.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::token_generator::generate_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Name recorded on tokens issued by login.
pub const LOGIN_TOKEN_NAME: &str = "auth_token";

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const UNAUTHENTICATED: &str = "Unauthenticated.";

/// Identity attached to a request after successful bearer authentication.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub token_id: i64,
    pub user: User,
}

/// Successful login: the user and the raw token, shown exactly once.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub user: User,
    pub token: String,
}

/// Service for credential checks and bearer token lifecycle.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
///
/// Token lifecycle: issued at login, active until logout revokes it. Revocation
/// is terminal.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user account repository
    /// - `tokens` - token repository
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            users,
            tokens,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies credentials and issues a new bearer token.
    ///
    /// The same error is returned for an unknown email and a wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            metrics::counter!("auth_login_total", "outcome" => "failure").increment(1);
            tracing::warn!("Login failed: unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_in_background(password, &user.password_hash).await? {
            metrics::counter!("auth_login_total", "outcome" => "failure").increment(1);
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = generate_token();
        let stored = self
            .tokens
            .create_token(user.id, LOGIN_TOKEN_NAME, &self.hash_token(&token))
            .await?;

        metrics::counter!("auth_login_total", "outcome" => "success").increment(1);
        tracing::info!(user_id = user.id, token_id = stored.id, "User logged in");

        Ok(IssuedToken { user, token })
    }

    /// Authenticates a raw bearer token.
    ///
    /// On success, updates the token's last-use timestamp (best effort).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - Token hash does not match any stored token
    /// - Token has been revoked
    /// - The owning user no longer exists
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, AppError> {
        let token_hash = self.hash_token(token);

        let Some(stored) = self.tokens.find_active(&token_hash).await? else {
            return Err(AppError::unauthorized(UNAUTHENTICATED));
        };

        let Some(user) = self.users.find_by_id(stored.user_id).await? else {
            return Err(AppError::unauthorized(UNAUTHENTICATED));
        };

        if let Err(e) = self.tokens.update_last_used(stored.id).await {
            tracing::debug!(error = %e, "Failed to update token last_used_at");
        }

        Ok(AuthContext {
            token_id: stored.id,
            user,
        })
    }

    /// Revokes the token that authenticated the current request.
    ///
    /// Idempotent: a token already revoked concurrently is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn logout(&self, context: &AuthContext) -> Result<(), AppError> {
        self.tokens.revoke_token(context.token_id).await?;

        metrics::counter!("auth_logout_total").increment(1);
        tracing::info!(
            user_id = context.user.id,
            token_id = context.token_id,
            "User logged out"
        );

        Ok(())
    }

    /// Creates a user with an Argon2-hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or storage errors.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;
        self.users
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
    }

    /// Creates the bootstrap user unless that email is already registered.
    ///
    /// Returns `true` when a user was created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on hashing or storage errors.
    pub async fn ensure_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        self.register_user(name, email, password).await?;
        Ok(true)
    }

    /// Whether user storage answers queries.
    pub async fn storage_healthy(&self) -> bool {
        self.users.health_check().await
    }
}

/// Runs Argon2 verification off the async worker threads.
async fn verify_in_background(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();

    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password verification task failed",
                json!({"error": e.to_string()}),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{ApiToken, MockTokenRepository, MockUserRepository};
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn test_user(password: &str) -> User {
        User {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_token(id: i64, user_id: i64, token_hash: &str) -> ApiToken {
        ApiToken {
            id,
            user_id,
            name: LOGIN_TOKEN_NAME.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        }
    }

    fn service(users: MockUserRepository, tokens: MockTokenRepository) -> AuthService {
        AuthService::new(Arc::new(users), Arc::new(tokens), test_secret())
    }

    #[tokio::test]
    async fn test_login_success_stores_hashed_token() {
        let mut users = MockUserRepository::new();
        let user = test_user("s3cret");
        users
            .expect_find_by_email()
            .withf(|email| email == "admin@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_create_token()
            .withf(|user_id, name, hash| *user_id == 1 && name == LOGIN_TOKEN_NAME && hash.len() == 64)
            .times(1)
            .returning(|user_id, _, hash| Ok(test_token(10, user_id, hash)));

        let issued = service(users, tokens)
            .login("admin@example.com", "s3cret")
            .await
            .unwrap();

        assert_eq!(issued.user.id, 1);
        assert_eq!(issued.token.len(), 48);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockUserRepository::new();
        let user = test_user("s3cret");
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut tokens = MockTokenRepository::new();
        tokens.expect_create_token().never();

        let result = service(users, tokens)
            .login("admin@example.com", "wrong")
            .await;

        match result {
            Err(AppError::Unauthorized { message }) => assert_eq!(message, "Invalid credentials"),
            other => panic!("expected unauthorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = service(users, MockTokenRepository::new())
            .login("nobody@example.com", "whatever")
            .await;

        match result {
            Err(AppError::Unauthorized { message }) => assert_eq!(message, "Invalid credentials"),
            other => panic!("expected unauthorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let token = "valid-token";
        let expected_hash = compute_expected_hash(token);

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_active()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|hash| Ok(Some(test_token(3, 1, hash))));
        tokens
            .expect_update_last_used()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(()));

        let mut users = MockUserRepository::new();
        let user = test_user("pw");
        users
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .returning(move |_| Ok(Some(user.clone())));

        let context = service(users, tokens).authenticate(token).await.unwrap();

        assert_eq!(context.token_id, 3);
        assert_eq!(context.user.email, "admin@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_active()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(MockUserRepository::new(), tokens)
            .authenticate("invalid-token")
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_last_used_failure_is_ignored() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_active()
            .returning(|hash| Ok(Some(test_token(3, 1, hash))));
        tokens
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let mut users = MockUserRepository::new();
        let user = test_user("pw");
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(users, tokens).authenticate("token").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_logout_revokes_current_token() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_revoke_token()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| Ok(true));

        let context = AuthContext {
            token_id: 42,
            user: test_user("pw"),
        };

        let result = service(MockUserRepository::new(), tokens)
            .logout(&context)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_user_skips_existing() {
        let mut users = MockUserRepository::new();
        let user = test_user("pw");
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_create().never();

        let created = service(users, MockTokenRepository::new())
            .ensure_user("Admin", "admin@example.com", "pw")
            .await
            .unwrap();

        assert!(!created);
    }

    #[tokio::test]
    async fn test_hash_token_consistency() {
        let svc = service(MockUserRepository::new(), MockTokenRepository::new());

        let hash1 = svc.hash_token("test-token");
        let hash2 = svc.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_eq!(hash1, compute_expected_hash("test-token"));
    }

    #[tokio::test]
    async fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockTokenRepository::new()),
            "secret-a".to_string(),
        );
        let svc2 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockTokenRepository::new()),
            "secret-b".to_string(),
        );

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }
}
