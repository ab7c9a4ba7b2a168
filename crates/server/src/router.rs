//! Route table.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::middleware::mw_require_auth;
use crate::config::AppState;
use crate::handlers::{auth as auth_handlers, follows, profile, trips};

pub fn router(state: AppState) -> Router {
    // Routes that require a verified session token
    let protected = Router::new()
        .route("/users/current", get(auth_handlers::current))
        .route("/users/follows", get(follows::list_follows))
        .route("/users/{user_id}/follow", put(follows::follow))
        .route("/users/{user_id}/unfollow", delete(follows::unfollow))
        .route(
            "/users/profile/image",
            post(profile::set_image).delete(profile::remove_image),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw_require_auth,
        ));

    Router::new()
        .route("/users/register", post(auth_handlers::register))
        .route("/users/login", post(auth_handlers::login))
        .route("/users/{user_id}/trips", get(trips::user_trips))
        .route("/health", get(health_check))
        .merge(protected)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK - Wayfarer Server"
}
