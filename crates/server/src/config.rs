//! Server configuration and shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::auth::token::TokenIssuer;
use crate::auth::AccountManager;
use crate::follows::FollowGraph;
use crate::images::ImageCleanup;
use crate::trips::TripStore;

/// Configuration for the Wayfarer server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Directory holding the SQLite database
    pub data_dir: PathBuf,
    /// HMAC secret for session tokens
    pub token_secret: String,
    /// Object-store endpoint for best-effort image cleanup
    pub image_store_url: Option<String>,
    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment, with defaults.
    pub fn from_env() -> Self {
        let token_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using development default");
            "wayfarer-dev-secret-change-in-production".to_string()
        });

        Self {
            data_dir: std::env::var("WAYFARER_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("wayfarer_data")),
            token_secret,
            image_store_url: std::env::var("IMAGE_STORE_URL").ok(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("wayfarer.sqlite")
    }

    /// Ensure the data directory exists.
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub auth: Arc<AccountManager>,
    pub follows: Arc<FollowGraph>,
    pub trips: Arc<TripStore>,
    pub tokens: Arc<TokenIssuer>,
    pub images: Arc<ImageCleanup>,
}
