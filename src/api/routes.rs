use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{index::index, ratings::post_rating, recommendations::get_recommendations, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/recommend/:user_id", get(get_recommendations))
        .route("/api/ratings", post(post_rating))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::models::{ErrorBody, MovieRecommendation, RatingResponse};
    use crate::cache::ModelCache;
    use crate::config::AppConfig;
    use crate::database::{self, movies, ratings, setup, users};

    fn test_state() -> Arc<AppState> {
        let pool = database::create_memory_pool().unwrap();
        {
            let conn = database::get_connection(&pool).unwrap();
            setup::ensure_schema(&conn).unwrap();
            for name in ["Ada", "Alan", "Grace"] {
                users::insert_user(&conn, name).unwrap();
            }
            movies::insert_movie(&conn, "Alien", "Sci-Fi", 1999).unwrap();
            movies::insert_movie(&conn, "Heat", "Thriller", 1995).unwrap();
            movies::insert_movie(&conn, "Up", "Animation", 2009).unwrap();
            ratings::upsert_rating(&conn, 1, 1, 5.0).unwrap();
            ratings::upsert_rating(&conn, 2, 2, 4.0).unwrap();
            ratings::upsert_rating(&conn, 3, 2, 5.0).unwrap();
        }

        let mut config = AppConfig::new();
        config.engine.clusters = 1;
        Arc::new(AppState {
            pool,
            config,
            models: ModelCache::new(),
        })
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn rating_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/ratings")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_recommend_returns_ranked_movies() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::get("/recommend/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<MovieRecommendation> = body_json(response).await;
        assert_eq!(
            body,
            vec![MovieRecommendation {
                item_id: 2,
                title: "Heat".to_string(),
                category: "Thriller".to_string(),
                year: 1995,
                predicted_rating: 3.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_recommend_response_uses_camel_case() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::get("/recommend/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: serde_json::Value = body_json(response).await;
        let first = &body[0];
        assert_eq!(first["itemId"], 2);
        assert_eq!(first["predictedRating"], 3.0);
        assert_eq!(first["category"], "Thriller");
    }

    #[tokio::test]
    async fn test_unknown_user_is_404_json() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::get("/recommend/99").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.status, 404);
        assert_eq!(body.detail, "User with id 99 not found");
    }

    #[tokio::test]
    async fn test_post_rating_stores_and_invalidates() {
        let state = test_state();
        let app = create_router(Arc::clone(&state));

        let response = app
            .oneshot(rating_request(r#"{"userId": 1, "movieId": 3, "rating": 4.0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: RatingResponse = body_json(response).await;
        assert_eq!((body.user_id, body.movie_id, body.rating), (1, 3, 4.0));
        assert_eq!(state.models.generation(), 1);
    }

    #[tokio::test]
    async fn test_post_rating_out_of_range_is_422() {
        let app = create_router(test_state());

        let response = app
            .oneshot(rating_request(r#"{"userId": 1, "movieId": 3, "rating": 0.0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/recommend/"));
    }
}
