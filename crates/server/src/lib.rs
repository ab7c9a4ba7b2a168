//! Wayfarer Travel Journal Server
//!
//! Account authentication, a unidirectional follow graph, and the
//! denormalized trip/postcard read endpoint.

pub mod auth;
pub mod config;
pub mod ctx;
pub mod error;
pub mod follows;
pub mod handlers;
pub mod images;
pub mod models;
pub mod router;
pub mod store;
pub mod trips;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use auth::token::TokenIssuer;
use auth::AccountManager;
use config::{AppState, ServerConfig};
use follows::FollowGraph;
use images::ImageCleanup;
use trips::TripStore;

pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already set, ignore
    }

    info!("=== Wayfarer Server ===");
    info!("Features: Auth | Follow Graph | Trip Aggregation");

    let config = ServerConfig::from_env();
    config.ensure_dirs().await?;
    info!("Database: {:?}", config.db_path());

    let pool = store::connect(&config.db_path()).await?;

    let tokens = Arc::new(TokenIssuer::new(&config.token_secret));
    let auth = Arc::new(AccountManager::new(pool.clone(), tokens.clone()));
    let follow_graph = Arc::new(FollowGraph::new(pool.clone()));
    let trip_store = Arc::new(TripStore::new(pool.clone()));
    let images = Arc::new(ImageCleanup::new(config.image_store_url.clone()));

    let state = AppState {
        config: config.clone(),
        auth,
        follows: follow_graph,
        trips: trip_store,
        tokens,
        images,
    };

    let app = router::router(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
