//! In-process implementation of token repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;
use serde_json::json;

/// In-memory token store.
#[derive(Default)]
pub struct MemoryTokenRepository {
    tokens: RwLock<Vec<ApiToken>>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut tokens = self.tokens.write().await;

        if tokens.iter().any(|t| t.token_hash == token_hash) {
            return Err(AppError::internal(
                "Token hash collision",
                json!({"user_id": user_id}),
            ));
        }

        let token = ApiToken {
            id: tokens.last().map_or(1, |t| t.id + 1),
            user_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tokens.push(token.clone());

        Ok(token)
    }

    async fn find_active(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .read()
            .await
            .iter()
            .find(|t| t.token_hash == token_hash && t.is_active())
            .cloned())
    }

    async fn update_last_used(&self, id: i64) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().await;
        if let Some(token) = tokens.iter_mut().find(|t| t.id == id && t.is_active()) {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn revoke_token(&self, id: i64) -> Result<bool, AppError> {
        let mut tokens = self.tokens.write().await;
        match tokens.iter_mut().find(|t| t.id == id && t.is_active()) {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, AppError> {
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();
        let mut revoked = 0;
        for token in tokens
            .iter_mut()
            .filter(|t| t.user_id == user_id && t.is_active())
        {
            token.revoked_at = Some(now);
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn list_tokens(&self, user_id: Option<i64>) -> Result<Vec<ApiToken>, AppError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .rev()
            .filter(|t| user_id.is_none_or(|id| t.user_id == id))
            .cloned()
            .collect())
    }
}
