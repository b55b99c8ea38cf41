use log::{debug, info};
use std::sync::Arc;

use crate::api::models::MovieRecommendation;
use crate::cache::{CachedModel, ModelCache};
use crate::config::EngineSettings;
use crate::database::{self, data_version, movies, ratings, users, DbConn, DbPool, StoredRating};
use crate::engine::types::{is_valid_rating, ItemId, Recommendation, UserId};
use crate::engine;
use crate::errors::{RecommendError, RecommendResult};

/// Ties storage, the model cache and the engine together for one request.
pub struct RecommendationService<'a> {
    pool: &'a DbPool,
    settings: &'a EngineSettings,
    cache: &'a ModelCache,
}

impl<'a> RecommendationService<'a> {
    pub fn new(pool: &'a DbPool, settings: &'a EngineSettings, cache: &'a ModelCache) -> Self {
        Self { pool, settings, cache }
    }

    pub fn recommend_for_user(&self, user_id: UserId) -> RecommendResult<Vec<MovieRecommendation>> {
        let mut conn = database::get_connection(self.pool)?;

        if !users::exists(&conn, user_id)? {
            return Err(RecommendError::UserNotFound(user_id));
        }

        let cached = self.load_model(&mut conn, user_id)?;
        let recommendations = cached.model.recommend(user_id, self.settings)?;
        info!("Recommending {} movies to user {}", recommendations.len(), user_id);

        recommendations
            .into_iter()
            .map(|r| attach_movie(&cached, r))
            .collect()
    }

    /// Stores a rating and marks the cached model stale.
    pub fn record_rating(&self, user_id: UserId, movie_id: ItemId, value: f64) -> RecommendResult<StoredRating> {
        if !is_valid_rating(value) {
            return Err(RecommendError::InvalidRating(value));
        }

        let conn = database::get_connection(self.pool)?;
        if !users::exists(&conn, user_id)? {
            return Err(RecommendError::UserNotFound(user_id));
        }
        if movies::find_by_id(&conn, movie_id)?.is_none() {
            return Err(RecommendError::MovieNotFound(movie_id));
        }

        let stored = ratings::upsert_rating(&conn, user_id, movie_id, value)?;
        self.cache.invalidate();
        info!("User {} rated movie {} with {}", user_id, movie_id, value);
        Ok(stored)
    }

    /// Serves the cached model while it matches the stored data and knows the
    /// user; anything else refits from a fresh snapshot.
    fn load_model(&self, conn: &mut DbConn, user_id: UserId) -> RecommendResult<Arc<CachedModel>> {
        if !self.settings.cache_model {
            return self.fit_from_storage(conn, self.cache.generation()).map(Arc::new);
        }

        let version = data_version::current(conn)?;
        self.cache.get_or_rebuild(
            |cached| {
                let fresh = cached.data_version == version && cached.model.contains_user(user_id);
                if !fresh {
                    debug!(
                        "Cached model at version {} is stale for user {} (storage at {})",
                        cached.data_version, user_id, version
                    );
                }
                fresh
            },
            |generation| self.fit_from_storage(conn, generation),
        )
    }

    fn fit_from_storage(&self, conn: &mut DbConn, generation: u64) -> RecommendResult<CachedModel> {
        let snapshot = database::load_snapshot(conn)?;
        let model = engine::fit(
            &snapshot.user_ids(),
            &snapshot.movie_ids(),
            &snapshot.engine_ratings(),
            self.settings,
        )?;
        Ok(CachedModel::new(generation, snapshot.version, model, snapshot.movies))
    }
}

fn attach_movie(cached: &CachedModel, recommendation: Recommendation) -> RecommendResult<MovieRecommendation> {
    let movie = cached.catalog.get(&recommendation.item_id).ok_or_else(|| {
        RecommendError::Data(format!("movie {} missing from catalog", recommendation.item_id))
    })?;

    Ok(MovieRecommendation {
        item_id: movie.id,
        title: movie.title.clone(),
        category: movie.genre.clone(),
        year: movie.year,
        predicted_rating: recommendation.predicted_rating,
    })
}
