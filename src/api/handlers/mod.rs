use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::cache::ModelCache;
use crate::config::settings::AppConfig;
use crate::services::RecommendationService;

pub mod index;
pub mod ratings;
pub mod recommendations;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
    pub models: ModelCache,
}

impl AppState {
    pub fn recommender(&self) -> RecommendationService<'_> {
        RecommendationService::new(&self.pool, &self.config.engine, &self.models)
    }
}
