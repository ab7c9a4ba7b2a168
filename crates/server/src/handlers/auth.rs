//! Registration, login, and current-user handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::{Error, Result};
use crate::models::Account;
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: Account,
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    info!("POST /users/register - {}", req.email);

    let outcome = validation::validate_register(&req.display_name, &req.email, &req.password);
    if !outcome.is_valid() {
        return Err(Error::Validation(outcome.errors));
    }

    let (user, token) = state
        .auth
        .register(req.display_name, req.email, req.password)
        .await?;

    Ok(Json(AuthResponse {
        user,
        success: true,
        token: format!("Bearer {token}"),
    }))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    info!("POST /users/login - {}", req.email);

    let outcome = validation::validate_login(&req.email, &req.password);
    if !outcome.is_valid() {
        return Err(Error::Validation(outcome.errors));
    }

    let (user, token) = state.auth.login(req.email, req.password).await?;

    Ok(Json(AuthResponse {
        user,
        success: true,
        token: format!("Bearer {token}"),
    }))
}

/// GET /users/current
pub async fn current(
    State(state): State<AppState>,
    ctx: Ctx,
) -> Result<Json<CurrentUserResponse>> {
    let account = state.auth.get(ctx.account_id()).await?;

    Ok(Json(CurrentUserResponse {
        id: account.id,
        display_name: account.display_name,
        email: account.email,
    }))
}
