//! Row-level account queries shared by the account and follow services.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Account;

/// Raw account row: id, display_name, email, password_hash, profile_pic,
/// created_at, updated_at.
type AccountRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
);

const ACCOUNT_COLUMNS: &str =
    "id, display_name, email, password_hash, profile_pic, created_at, updated_at";

fn account_from_row(row: AccountRow, following: Vec<String>) -> Account {
    let (id, display_name, email, password_hash, profile_pic, created_at, updated_at) = row;
    Account {
        id,
        display_name,
        email,
        password_hash,
        profile_pic,
        following,
        created_at: created_at.parse().unwrap_or_else(|_| Utc::now()),
        updated_at: updated_at.parse().unwrap_or_else(|_| Utc::now()),
    }
}

/// Identifiers the account follows, oldest edge first.
pub async fn fetch_following(
    pool: &SqlitePool,
    account_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT followed_id FROM follows WHERE account_id = ? ORDER BY created_at",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Fetch an account by identifier, with its follow-set materialized.
pub async fn fetch_account(
    pool: &SqlitePool,
    account_id: &str,
) -> Result<Option<Account>, sqlx::Error> {
    let row: Option<AccountRow> = sqlx::query_as(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
    ))
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let following = fetch_following(pool, account_id).await?;
            Ok(Some(account_from_row(row, following)))
        }
        None => Ok(None),
    }
}

/// Fetch an account by email (exact, case-sensitive as stored).
pub async fn fetch_account_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    let row: Option<AccountRow> = sqlx::query_as(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let following = fetch_following(pool, &row.0).await?;
            Ok(Some(account_from_row(row, following)))
        }
        None => Ok(None),
    }
}

pub async fn account_exists(pool: &SqlitePool, account_id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT id FROM accounts WHERE id = ?")
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn insert_account(pool: &SqlitePool, account: &Account) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO accounts (id, display_name, email, password_hash, profile_pic, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&account.id)
    .bind(&account.display_name)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(&account.profile_pic)
    .bind(account.created_at.to_rfc3339())
    .bind(account.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}
