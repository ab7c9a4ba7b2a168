//! SQLite-backed document store.
//!
//! One shared connection pool is created at startup and handed to every
//! service; the schema is created with CREATE TABLE IF NOT EXISTS on boot.
//! Timestamps are stored as RFC 3339 text.

pub mod accounts;

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Open (creating if missing) the database at `db_path` and ensure the
/// schema exists.
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&format!(
        "sqlite://{}",
        db_path.to_string_lossy().replace('\\', "/")
    ))?
    .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    init_schema(&pool).await?;

    info!("[Store] Initialized at {:?}", db_path);

    Ok(pool)
}

async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            profile_pic TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One row per follow edge. The UNIQUE constraint is what makes the
    // follow-set duplicate-free and lets follow/unfollow run as single
    // conditional statements.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS follows (
            id TEXT PRIMARY KEY,
            account_id TEXT NOT NULL,
            followed_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (account_id) REFERENCES accounts(id),
            UNIQUE(account_id, followed_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trips (
            id TEXT PRIMARY KEY,
            traveller_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            revision INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (traveller_id) REFERENCES accounts(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS postcards (
            id TEXT PRIMARY KEY,
            trip_id TEXT NOT NULL,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            lat REAL NOT NULL,
            lng REAL NOT NULL,
            photos TEXT NOT NULL,
            thumbnails TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            revision INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (trip_id) REFERENCES trips(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
