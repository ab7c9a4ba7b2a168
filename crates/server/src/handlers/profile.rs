//! Profile-picture handlers.
//!
//! The upload itself is handled by the external object store; these
//! endpoints record the stored URL and clean up the previous object
//! best-effort.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::Result;
use crate::images;
use crate::models::Account;

#[derive(Debug, Deserialize)]
pub struct SetImageRequest {
    /// URL of the uploaded object
    pub image: String,
}

async fn cleanup_previous(state: &AppState, profile_pic: Option<&String>) {
    if let Some(url) = profile_pic {
        if let Some((bucket, key)) = images::parse_bucket_key(url) {
            state.images.delete(&bucket, &key).await;
        }
    }
}

/// POST /users/profile/image
pub async fn set_image(
    State(state): State<AppState>,
    ctx: Ctx,
    Json(req): Json<SetImageRequest>,
) -> Result<Json<Account>> {
    info!("POST /users/profile/image");

    let current = state.auth.get(ctx.account_id()).await?;
    cleanup_previous(&state, current.profile_pic.as_ref()).await;

    let account = state
        .auth
        .update_profile_pic(ctx.account_id(), Some(req.image))
        .await?;
    Ok(Json(account))
}

/// DELETE /users/profile/image
pub async fn remove_image(State(state): State<AppState>, ctx: Ctx) -> Result<Json<Account>> {
    info!("DELETE /users/profile/image");

    let current = state.auth.get(ctx.account_id()).await?;
    cleanup_previous(&state, current.profile_pic.as_ref()).await;

    let account = state.auth.update_profile_pic(ctx.account_id(), None).await?;
    Ok(Json(account))
}
