//! Service error taxonomy.
//!
//! Client-caused failures carry the exact response bodies the frontend
//! expects (field-keyed maps for auth forms, bare strings for follow
//! mutations). Storage, hashing, and signing faults collapse into
//! `Internal` and are logged server-side only.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // Request validation
    #[error("validation failed")]
    Validation(HashMap<String, String>),

    // Account errors
    #[error("email already registered")]
    DuplicateEmail,
    #[error("user not found")]
    AccountNotFound,
    #[error("incorrect password")]
    InvalidCredentials,

    // Follow graph errors
    #[error("already following that user")]
    AlreadyFollowing,
    #[error("not yet following that user")]
    NotFollowing,

    // Auth errors
    #[error("no auth token found")]
    MissingToken,
    #[error("auth token wrong format")]
    TokenWrongFormat,
    #[error("session token expired")]
    TokenExpired,
    #[error("session token invalid")]
    TokenInvalid,
    #[error("auth context missing")]
    CtxMissing,

    // Generic
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!(errors))).into_response()
            }
            Error::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "email": "Email already registered" })),
            )
                .into_response(),
            Error::AccountNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "email": "User not found" })),
            )
                .into_response(),
            Error::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "password": "Incorrect password" })),
            )
                .into_response(),
            Error::AlreadyFollowing => (
                StatusCode::BAD_REQUEST,
                Json(json!("Already following that user")),
            )
                .into_response(),
            Error::NotFollowing => (
                StatusCode::BAD_REQUEST,
                Json(json!("Not yet following that user")),
            )
                .into_response(),
            Error::MissingToken
            | Error::TokenWrongFormat
            | Error::TokenExpired
            | Error::TokenInvalid => {
                let message = self.to_string();
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": { "message": message } })),
                )
                    .into_response()
            }
            Error::CtxMissing | Error::Internal(_) => {
                error!("Internal server error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": { "message": "Internal server error" } })),
                )
                    .into_response()
            }
        }
    }
}

// Storage and bootstrap faults surface as generic server errors.
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        Error::Internal(err.to_string())
    }
}
