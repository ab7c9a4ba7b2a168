//! Follow graph handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::Result;
use crate::models::Account;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowsResponse {
    pub followed_users: HashMap<String, Account>,
}

/// PUT /users/{user_id}/follow
pub async fn follow(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> Result<Json<Account>> {
    info!("PUT /users/{}/follow", user_id);

    let account = state.follows.follow(ctx.account_id(), &user_id).await?;
    Ok(Json(account))
}

/// DELETE /users/{user_id}/unfollow
pub async fn unfollow(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> Result<Json<Account>> {
    info!("DELETE /users/{}/unfollow", user_id);

    let account = state.follows.unfollow(ctx.account_id(), &user_id).await?;
    Ok(Json(account))
}

/// GET /users/follows
pub async fn list_follows(
    State(state): State<AppState>,
    ctx: Ctx,
) -> Result<Json<FollowsResponse>> {
    let followed_users = state.follows.list_followed(ctx.account_id()).await?;
    Ok(Json(FollowsResponse { followed_users }))
}
