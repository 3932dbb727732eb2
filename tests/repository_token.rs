//! PostgreSQL user and token repository tests.
//!
//! Need a live database: `DATABASE_URL=... cargo test -- --ignored`.

use crud_api::domain::entities::NewUser;
use crud_api::domain::repositories::{TokenRepository, UserRepository};
use crud_api::infrastructure::persistence::{PgTokenRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

async fn create_user(pool: &Arc<PgPool>, email: &str) -> i64 {
    PgUserRepository::new(pool.clone())
        .create(NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_user_email_unique(pool: PgPool) {
    let pool = Arc::new(pool);
    create_user(&pool, "admin@example.com").await;

    let result = PgUserRepository::new(pool)
        .create(NewUser {
            name: "Dup".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "x".to_string(),
        })
        .await;

    assert!(result.is_err());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find_active(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "admin@example.com").await;
    let repo = PgTokenRepository::new(pool);

    let token = repo
        .create_token(user_id, "auth_token", "hash123")
        .await
        .unwrap();

    assert_eq!(token.user_id, user_id);
    assert_eq!(token.name, "auth_token");
    assert!(token.revoked_at.is_none());

    let found = repo.find_active("hash123").await.unwrap().unwrap();
    assert_eq!(found.id, token.id);

    assert!(repo.find_active("nonexistent").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_revoke_token(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "admin@example.com").await;
    let repo = PgTokenRepository::new(pool);

    let token = repo
        .create_token(user_id, "auth_token", "revokedhash")
        .await
        .unwrap();

    assert!(repo.revoke_token(token.id).await.unwrap());
    assert!(!repo.revoke_token(token.id).await.unwrap());
    assert!(repo.find_active("revokedhash").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_last_used(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "admin@example.com").await;
    let repo = PgTokenRepository::new(pool);

    let token = repo.create_token(user_id, "auth_token", "h").await.unwrap();
    assert!(token.last_used_at.is_none());

    repo.update_last_used(token.id).await.unwrap();

    let found = repo.find_active("h").await.unwrap().unwrap();
    assert!(found.last_used_at.is_some());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_revoke_all_for_user(pool: PgPool) {
    let pool = Arc::new(pool);
    let ada = create_user(&pool, "ada@example.com").await;
    let grace = create_user(&pool, "grace@example.com").await;
    let repo = PgTokenRepository::new(pool);

    repo.create_token(ada, "auth_token", "a1").await.unwrap();
    repo.create_token(ada, "auth_token", "a2").await.unwrap();
    repo.create_token(grace, "auth_token", "g1").await.unwrap();

    assert_eq!(repo.revoke_all_for_user(ada).await.unwrap(), 2);
    assert!(repo.find_active("g1").await.unwrap().is_some());

    let ada_tokens = repo.list_tokens(Some(ada)).await.unwrap();
    assert_eq!(ada_tokens.len(), 2);
    assert!(ada_tokens.iter().all(|t| !t.is_active()));
}
