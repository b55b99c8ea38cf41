use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::models::{RatingRequest, RatingResponse};

pub async fn post_rating(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RatingRequest>,
) -> Result<Json<RatingResponse>, ApiError> {
    let stored = tokio::task::spawn_blocking(move || {
        state
            .recommender()
            .record_rating(request.user_id, request.movie_id, request.rating)
    })
    .await
    .map_err(ApiError::internal)??;

    Ok(Json(stored.into()))
}
