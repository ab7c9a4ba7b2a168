use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::{Error, Result};

/// Authenticated request context, inserted by the auth middleware.
#[derive(Clone, Debug)]
pub struct Ctx {
    account_id: String,
    display_name: String,
}

impl Ctx {
    pub fn new(account_id: String, display_name: String) -> Self {
        Self {
            account_id,
            display_name,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::CtxMissing)
    }
}
