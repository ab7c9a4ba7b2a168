use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::{Error, Result};

/// Require a valid Bearer session token; on success the verified
/// identity is inserted into request extensions as [`Ctx`].
pub async fn mw_require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    debug!("MIDDLEWARE: require_auth");

    let auth_header = req.headers().get(header::AUTHORIZATION);
    let auth_header = match auth_header {
        Some(h) => h.to_str().map_err(|_| Error::TokenWrongFormat)?,
        None => return Err(Error::MissingToken),
    };

    // Format: "Bearer <token>"
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(Error::TokenWrongFormat)?;

    let claims = state.tokens.verify(token)?;

    let ctx = Ctx::new(claims.sub, claims.display_name);
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
