use std::sync::Arc;

use server::auth::token::TokenIssuer;
use server::auth::AccountManager;
use server::error::Error;
use server::store;
use sqlx::SqlitePool;
use tempfile::{tempdir, TempDir};

const TEST_SECRET: &str = "wayfarer-test-secret";

async fn setup() -> (TempDir, SqlitePool, AccountManager) {
    let dir = tempdir().unwrap();
    let pool = store::connect(&dir.path().join("test.sqlite"))
        .await
        .unwrap();
    let tokens = Arc::new(TokenIssuer::new(TEST_SECRET));
    let auth = AccountManager::new(pool.clone(), tokens);
    (dir, pool, auth)
}

#[tokio::test]
async fn test_register_never_stores_raw_password() {
    let (_dir, _pool, auth) = setup().await;

    let (account, token) = auth
        .register(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "secret123".to_string(),
        )
        .await
        .unwrap();

    assert!(!token.is_empty());
    assert_ne!(account.password_hash, "secret123");
    assert!(bcrypt::verify("secret123", &account.password_hash).unwrap());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (_dir, pool, auth) = setup().await;

    auth.register(
        "Alice".to_string(),
        "alice@example.com".to_string(),
        "secret123".to_string(),
    )
    .await
    .unwrap();

    let result = auth
        .register(
            "Impostor".to_string(),
            "alice@example.com".to_string(),
            "other-password".to_string(),
        )
        .await;
    assert!(matches!(result, Err(Error::DuplicateEmail)));

    // No second record was created.
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts WHERE email = ?")
        .bind("alice@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_login_token_binds_account_identity() {
    let (_dir, _pool, auth) = setup().await;

    let (registered, _) = auth
        .register(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "secret123".to_string(),
        )
        .await
        .unwrap();

    let (account, token) = auth
        .login("alice@example.com".to_string(), "secret123".to_string())
        .await
        .unwrap();
    assert_eq!(account.id, registered.id);

    let claims = TokenIssuer::new(TEST_SECRET).verify(&token).unwrap();
    assert_eq!(claims.sub, registered.id);
    assert_eq!(claims.display_name, "Alice");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (_dir, _pool, auth) = setup().await;

    auth.register(
        "Alice".to_string(),
        "alice@example.com".to_string(),
        "secret123".to_string(),
    )
    .await
    .unwrap();

    let result = auth
        .login("alice@example.com".to_string(), "wrong-password".to_string())
        .await;
    assert!(matches!(result, Err(Error::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (_dir, _pool, auth) = setup().await;

    let result = auth
        .login("nobody@example.com".to_string(), "secret123".to_string())
        .await;
    assert!(matches!(result, Err(Error::AccountNotFound)));
}

#[tokio::test]
async fn test_new_account_follows_itself() {
    let (_dir, _pool, auth) = setup().await;

    let (account, _) = auth
        .register(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "secret123".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(account.following, vec![account.id.clone()]);
}

#[tokio::test]
async fn test_profile_pic_replace_and_remove() {
    let (_dir, _pool, auth) = setup().await;

    let (account, _) = auth
        .register(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "secret123".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(account.profile_pic, None);

    let updated = auth
        .update_profile_pic(
            &account.id,
            Some("https://pics.example.com/avatar.jpg".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(
        updated.profile_pic.as_deref(),
        Some("https://pics.example.com/avatar.jpg")
    );

    let cleared = auth.update_profile_pic(&account.id, None).await.unwrap();
    assert_eq!(cleared.profile_pic, None);
}
