use log::info;
use ndarray::Array2;

use super::kmeans::{ClusterModel, KMeansConfig};
use super::matrix::RatingMatrix;
use super::recommend::recommend;
use super::scaler::StandardScaler;
use super::types::{ItemId, RankingPolicy, Rating, Recommendation, UserId};
use crate::config::settings::EngineSettings;
use crate::errors::RecommendResult;

/// Everything one recommendation call needs, fitted from a single data snapshot.
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub matrix: RatingMatrix,
    pub scaled: Array2<f64>,
    pub clusters: ClusterModel,
}

/// Builds the rating matrix, standardises it and clusters the users.
pub fn fit(
    users: &[UserId],
    items: &[ItemId],
    ratings: &[Rating],
    settings: &EngineSettings,
) -> RecommendResult<FittedModel> {
    let matrix = RatingMatrix::build(users, items, ratings)?;
    let (_, scaled) = StandardScaler::fit_transform(matrix.values())?;
    let clusters = ClusterModel::fit(&scaled, &kmeans_config(settings))?;

    info!(
        "Fitted model: {} users, {} items, {} clusters, inertia {:.3}",
        matrix.user_ids().len(),
        matrix.item_ids().len(),
        clusters.n_clusters(),
        clusters.inertia
    );

    Ok(FittedModel {
        matrix,
        scaled,
        clusters,
    })
}

impl FittedModel {
    pub fn recommend(&self, user_id: UserId, settings: &EngineSettings) -> RecommendResult<Vec<Recommendation>> {
        recommend(
            user_id,
            &self.matrix,
            &self.scaled,
            &self.clusters,
            &ranking_policy(settings),
            settings.top_n,
        )
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.matrix.contains_user(user_id)
    }
}

fn kmeans_config(settings: &EngineSettings) -> KMeansConfig {
    KMeansConfig {
        n_clusters: settings.clusters,
        max_iterations: settings.max_iterations,
        seed: settings.random_seed,
    }
}

fn ranking_policy(settings: &EngineSettings) -> RankingPolicy {
    RankingPolicy {
        include_self: settings.include_self_in_peers,
        dilute_unrated: settings.dilute_unrated_peers,
    }
}
