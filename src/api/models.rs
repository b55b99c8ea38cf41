use serde::{Deserialize, Serialize};

use crate::database::StoredRating;
use crate::engine::types::{ItemId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecommendation {
    pub item_id: ItemId,
    pub title: String,
    pub category: String,
    pub year: i32,
    pub predicted_rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    pub user_id: UserId,
    pub movie_id: ItemId,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: i64,
    pub user_id: UserId,
    pub movie_id: ItemId,
    pub rating: f64,
}

impl From<StoredRating> for RatingResponse {
    fn from(stored: StoredRating) -> Self {
        Self {
            id: stored.id,
            user_id: stored.user_id,
            movie_id: stored.movie_id,
            rating: stored.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub detail: String,
}
