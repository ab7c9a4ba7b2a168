//! Follow graph.
//!
//! Unidirectional edges stored in the `follows` table. The UNIQUE
//! constraint on (account_id, followed_id) keeps the follow-set
//! duplicate-free, and both mutations are single conditional statements:
//! two concurrent follow calls for the same pair cannot produce a lost
//! update or a duplicate edge.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Account;
use crate::store::accounts;

/// Follow graph service: follow/unfollow mutations and resolution of an
/// account's followed set.
pub struct FollowGraph {
    pool: SqlitePool,
}

impl FollowGraph {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn require_account(&self, account_id: &str) -> Result<()> {
        if accounts::account_exists(&self.pool, account_id).await? {
            Ok(())
        } else {
            Err(Error::AccountNotFound)
        }
    }

    /// Add `target_id` to the acting account's follow-set.
    ///
    /// Not idempotent: following an already-followed account fails with
    /// `AlreadyFollowing` and leaves the set unchanged.
    pub async fn follow(&self, acting_id: &str, target_id: &str) -> Result<Account> {
        self.require_account(acting_id).await?;
        self.require_account(target_id).await?;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO follows (id, account_id, followed_id, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(acting_id)
        .bind(target_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::AlreadyFollowing);
        }

        info!("[Follows] {} -> {}", acting_id, target_id);

        accounts::fetch_account(&self.pool, acting_id)
            .await?
            .ok_or(Error::AccountNotFound)
    }

    /// Remove `target_id` from the acting account's follow-set.
    pub async fn unfollow(&self, acting_id: &str, target_id: &str) -> Result<Account> {
        self.require_account(acting_id).await?;
        self.require_account(target_id).await?;

        let result = sqlx::query("DELETE FROM follows WHERE account_id = ? AND followed_id = ?")
            .bind(acting_id)
            .bind(target_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFollowing);
        }

        info!("[Follows] {} -x- {}", acting_id, target_id);

        accounts::fetch_account(&self.pool, acting_id)
            .await?
            .ok_or(Error::AccountNotFound)
    }

    /// Resolve every followed identifier to its full current record,
    /// keyed by identifier. Edges whose target no longer exists drop out
    /// of the join and are silently omitted.
    pub async fn list_followed(&self, account_id: &str) -> Result<HashMap<String, Account>> {
        self.require_account(account_id).await?;

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT a.id FROM follows f \
             JOIN accounts a ON f.followed_id = a.id \
             WHERE f.account_id = ? \
             ORDER BY f.created_at",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        let mut followed = HashMap::new();
        for (followed_id,) in rows {
            if let Some(account) = accounts::fetch_account(&self.pool, &followed_id).await? {
                followed.insert(followed_id, account);
            }
        }

        Ok(followed)
    }
}
