//! Account registration and login.
//!
//! Passwords are bcrypt-hashed with a per-hash random salt; the hash
//! cost is deliberately slow, so hashing and verification run on a
//! blocking thread instead of the request-dispatch path. Session tokens
//! are issued on both the registration and login paths.

pub mod middleware;
pub mod token;

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Account;
use crate::store::accounts;
use token::TokenIssuer;

/// Account manager handles registration, login, and profile updates.
pub struct AccountManager {
    pool: SqlitePool,
    tokens: Arc<TokenIssuer>,
}

impl AccountManager {
    pub fn new(pool: SqlitePool, tokens: Arc<TokenIssuer>) -> Self {
        Self { pool, tokens }
    }

    /// Register a new account and issue its first session token.
    ///
    /// The caller is expected to have run field validation already; this
    /// re-checks only the email uniqueness constraint.
    pub async fn register(
        &self,
        display_name: String,
        email: String,
        password: String,
    ) -> Result<(Account, String)> {
        let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM accounts WHERE email = ?")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(Error::DuplicateEmail);
        }

        let password_hash = hash_password(password).await?;

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4().to_string(),
            display_name,
            email,
            password_hash,
            profile_pic: None,
            following: vec![],
            created_at: now,
            updated_at: now,
        };
        accounts::insert_account(&self.pool, &account).await?;

        // Policy: new accounts follow themselves so their own content
        // appears in the follow feed. See DESIGN.md before changing.
        sqlx::query(
            "INSERT INTO follows (id, account_id, followed_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&account.id)
        .bind(&account.id)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let account = self.get(&account.id).await?;
        let token = self.tokens.issue(&account.id, &account.display_name)?;

        info!(
            "[Auth] Account registered: {} ({})",
            account.display_name, account.email
        );

        Ok((account, token))
    }

    /// Verify credentials and issue a fresh session token.
    pub async fn login(&self, email: String, password: String) -> Result<(Account, String)> {
        let account = accounts::fetch_account_by_email(&self.pool, &email)
            .await?
            .ok_or(Error::AccountNotFound)?;

        let valid = verify_password(password, account.password_hash.clone()).await?;
        if !valid {
            warn!("[Auth] Failed login attempt for {}", email);
            return Err(Error::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.id, &account.display_name)?;

        info!("[Auth] Logged in: {}", account.display_name);

        Ok((account, token))
    }

    /// Fetch an account by identifier.
    pub async fn get(&self, account_id: &str) -> Result<Account> {
        accounts::fetch_account(&self.pool, account_id)
            .await?
            .ok_or(Error::AccountNotFound)
    }

    /// Replace or clear the profile-picture reference. Deleting the old
    /// stored object is the caller's concern (best-effort).
    pub async fn update_profile_pic(
        &self,
        account_id: &str,
        profile_pic: Option<String>,
    ) -> Result<Account> {
        let result = sqlx::query("UPDATE accounts SET profile_pic = ?, updated_at = ? WHERE id = ?")
            .bind(&profile_pic)
            .bind(Utc::now().to_rfc3339())
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::AccountNotFound);
        }

        self.get(account_id).await
    }
}

async fn hash_password(raw: String) -> Result<String> {
    let hashed = tokio::task::spawn_blocking(move || hash(raw, DEFAULT_COST))
        .await
        .map_err(|e| Error::Internal(e.to_string()))??;
    Ok(hashed)
}

async fn verify_password(raw: String, password_hash: String) -> Result<bool> {
    let valid = tokio::task::spawn_blocking(move || verify(raw, &password_hash))
        .await
        .map_err(|e| Error::Internal(e.to_string()))??;
    Ok(valid)
}
