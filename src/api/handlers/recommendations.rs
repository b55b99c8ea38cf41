use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::models::MovieRecommendation;
use crate::engine::types::UserId;

pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<MovieRecommendation>>, ApiError> {
    let recommendations = tokio::task::spawn_blocking(move || state.recommender().recommend_for_user(user_id))
        .await
        .map_err(ApiError::internal)??;

    Ok(Json(recommendations))
}
