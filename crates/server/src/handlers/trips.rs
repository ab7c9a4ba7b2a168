//! Aggregated trip read handler.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::AppState;
use crate::error::Result;
use crate::trips::AggregateDocument;

/// GET /users/{user_id}/trips
pub async fn user_trips(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AggregateDocument>> {
    let document = state.trips.aggregate(&user_id).await?;
    Ok(Json(document))
}
