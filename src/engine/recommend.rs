use log::debug;
use ndarray::Array2;

use super::kmeans::ClusterModel;
use super::matrix::RatingMatrix;
use super::types::{round_to_cents, RankingPolicy, Recommendation, UserId, UNRATED};
use crate::errors::{RecommendError, RecommendResult};

/// Ranks the items `user_id` has not rated by the average raw rating of their cluster peers.
///
/// Steps:
/// 1. locate the user's row and predict its cluster from the scaled row
/// 2. gather the peers sharing that cluster (the user included unless the
///    policy says otherwise)
/// 3. score every unrated item, drop scores that are not positive
/// 4. order by rounded score descending, then item id ascending, and keep `top_n`
pub fn recommend(
    user_id: UserId,
    matrix: &RatingMatrix,
    scaled: &Array2<f64>,
    model: &ClusterModel,
    policy: &RankingPolicy,
    top_n: usize,
) -> RecommendResult<Vec<Recommendation>> {
    let row = matrix
        .row_of(user_id)
        .ok_or(RecommendError::UserNotFound(user_id))?;

    if scaled.dim() != matrix.values().dim() {
        return Err(RecommendError::Numeric(format!(
            "scaled matrix shape {:?} differs from rating matrix shape {:?}",
            scaled.dim(),
            matrix.values().dim()
        )));
    }

    let cluster = model.predict(scaled.row(row));
    let peers = collect_peers(model, cluster, row, policy);
    debug!("User {} falls in cluster {} with {} peers", user_id, cluster, peers.len());

    let unrated = unrated_columns(matrix, row);
    if unrated.is_empty() {
        return Err(RecommendError::NoUnratedItems(user_id));
    }

    let mut scored: Vec<Recommendation> = unrated
        .into_iter()
        .filter_map(|col| {
            let average = peer_average(matrix.values(), &peers, col, policy)?;
            (average > 0.0).then(|| Recommendation {
                item_id: matrix.item_ids()[col],
                predicted_rating: round_to_cents(average),
            })
        })
        .collect();

    if scored.is_empty() {
        return Err(RecommendError::NoRecommendations(user_id));
    }

    rank(&mut scored);
    scored.truncate(top_n);
    Ok(scored)
}

fn collect_peers(model: &ClusterModel, cluster: usize, target_row: usize, policy: &RankingPolicy) -> Vec<usize> {
    model
        .members(cluster)
        .into_iter()
        .filter(|&row| policy.include_self || row != target_row)
        .collect()
}

fn unrated_columns(matrix: &RatingMatrix, row: usize) -> Vec<usize> {
    matrix
        .values()
        .row(row)
        .iter()
        .enumerate()
        .filter(|(_, value)| **value == UNRATED)
        .map(|(col, _)| col)
        .collect()
}

/// `None` when there is nobody to average over.
fn peer_average(values: &Array2<f64>, peers: &[usize], col: usize, policy: &RankingPolicy) -> Option<f64> {
    let ratings = peers.iter().map(|&row| values[[row, col]]);

    let (sum, count) = if policy.dilute_unrated {
        (ratings.sum::<f64>(), peers.len())
    } else {
        ratings
            .filter(|&value| value != UNRATED)
            .fold((0.0, 0), |(sum, count), value| (sum + value, count + 1))
    };

    (count > 0).then(|| sum / count as f64)
}

fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.predicted_rating
            .total_cmp(&a.predicted_rating)
            .then(a.item_id.cmp(&b.item_id))
    });
}
