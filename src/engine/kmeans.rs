use std::collections::HashMap;

use log::{debug, info};
use ndarray::{Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::matrix::RatingMatrix;
use super::types::{ClusterId, UserId};
use crate::errors::{RecommendError, RecommendResult};

#[derive(Debug, Clone)]
pub struct KMeansConfig {
    pub n_clusters: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            n_clusters: 5,
            max_iterations: 300,
            seed: 42,
        }
    }
}

/// Users partitioned by Lloyd's k-means in scaled rating space.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    /// Cluster of each matrix row, in row order.
    pub labels: Vec<ClusterId>,
    /// Row `c` is the centroid of cluster `c`.
    pub centroids: Array2<f64>,
    pub iterations: usize,
    pub converged: bool,
    /// Sum of squared distances from each row to its centroid.
    pub inertia: f64,
}

impl ClusterModel {
    /// Fits k-means to the rows of `data`.
    ///
    /// `n_clusters` is clamped to the number of rows. Hitting the iteration
    /// cap is not an error: the last assignment is returned with
    /// `converged == false`.
    pub fn fit(data: &Array2<f64>, config: &KMeansConfig) -> RecommendResult<Self> {
        let n_rows = data.nrows();
        if n_rows == 0 {
            return Err(RecommendError::Numeric("cannot cluster zero users".into()));
        }
        if config.n_clusters == 0 {
            return Err(RecommendError::Numeric("number of clusters must be at least 1".into()));
        }

        let k = config.n_clusters.min(n_rows);
        if k < config.n_clusters {
            debug!("Clamping cluster count from {} to {} rows", config.n_clusters, k);
        }

        let mut centroids = initial_centroids(data, k, config.seed);
        let mut labels = assign_all(data, &centroids);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < config.max_iterations {
            iterations += 1;
            centroids = update_centroids(data, &labels, &centroids);
            let new_labels = assign_all(data, &centroids);

            if new_labels == labels {
                converged = true;
                break;
            }
            labels = new_labels;
        }

        if converged {
            info!("k-means converged in {} iterations ({} clusters, {} users)", iterations, k, n_rows);
        } else {
            info!("k-means stopped at iteration cap {} without converging", iterations);
        }

        let inertia = inertia(data, &labels, &centroids);
        Ok(Self {
            labels,
            centroids,
            iterations,
            converged,
            inertia,
        })
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    pub fn predict(&self, vector: ArrayView1<'_, f64>) -> ClusterId {
        predict(vector, &self.centroids)
    }

    /// Maps the row-ordered labels back to the user ids of `matrix`.
    pub fn labels_by_user(&self, matrix: &RatingMatrix) -> HashMap<UserId, ClusterId> {
        matrix
            .user_ids()
            .iter()
            .zip(self.labels.iter())
            .map(|(&user_id, &label)| (user_id, label))
            .collect()
    }

    /// Row indices of all members of `cluster`.
    pub fn members(&self, cluster: ClusterId) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == cluster)
            .map(|(row, _)| row)
            .collect()
    }
}

/// Nearest centroid by Euclidean distance; ties go to the lowest cluster id.
pub fn predict(vector: ArrayView1<'_, f64>, centroids: &Array2<f64>) -> ClusterId {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;

    for (cluster, centroid) in centroids.rows().into_iter().enumerate() {
        let distance = squared_distance(vector, centroid);
        if distance < best_distance {
            best = cluster;
            best_distance = distance;
        }
    }

    best
}

fn initial_centroids(data: &Array2<f64>, k: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = rand::seq::index::sample(&mut rng, data.nrows(), k).into_vec();
    data.select(Axis(0), &rows)
}

fn assign_all(data: &Array2<f64>, centroids: &Array2<f64>) -> Vec<ClusterId> {
    data.rows().into_iter().map(|row| predict(row, centroids)).collect()
}

fn update_centroids(data: &Array2<f64>, labels: &[ClusterId], previous: &Array2<f64>) -> Array2<f64> {
    let k = previous.nrows();
    let mut sums = Array2::<f64>::zeros((k, data.ncols()));
    let mut counts = vec![0usize; k];

    for (row, &label) in data.rows().into_iter().zip(labels) {
        let mut sum = sums.row_mut(label);
        sum += &row;
        counts[label] += 1;
    }

    for (cluster, &count) in counts.iter().enumerate() {
        if count > 0 {
            sums.row_mut(cluster).mapv_inplace(|x| x / count as f64);
        }
    }

    reseed_empty_clusters(data, labels, &counts, &mut sums, previous);
    sums
}

/// Moves each empty cluster onto the row farthest from its previous centroid.
fn reseed_empty_clusters(
    data: &Array2<f64>,
    labels: &[ClusterId],
    counts: &[usize],
    centroids: &mut Array2<f64>,
    previous: &Array2<f64>,
) {
    let empty: Vec<ClusterId> = (0..counts.len()).filter(|&c| counts[c] == 0).collect();
    if empty.is_empty() {
        return;
    }

    let mut by_distance: Vec<(usize, f64)> = data
        .rows()
        .into_iter()
        .zip(labels)
        .enumerate()
        .map(|(row, (values, &label))| (row, squared_distance(values, previous.row(label))))
        .collect();
    // Farthest first; equal distances keep the lower row first.
    by_distance.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    for (cluster, (row, _)) in empty.into_iter().zip(by_distance) {
        debug!("Re-seeding empty cluster {} from row {}", cluster, row);
        centroids.row_mut(cluster).assign(&data.row(row));
    }
}

fn inertia(data: &Array2<f64>, labels: &[ClusterId], centroids: &Array2<f64>) -> f64 {
    data.rows()
        .into_iter()
        .zip(labels)
        .map(|(row, &label)| squared_distance(row, centroids.row(label)))
        .sum()
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_blobs() -> Array2<f64> {
        array![
            [0.0, 0.1],
            [0.2, 0.0],
            [0.1, 0.2],
            [10.0, 10.1],
            [10.2, 9.9],
            [9.8, 10.0],
        ]
    }

    fn config(k: usize) -> KMeansConfig {
        KMeansConfig {
            n_clusters: k,
            ..KMeansConfig::default()
        }
    }

    #[test]
    fn test_separates_obvious_blobs() {
        let model = ClusterModel::fit(&two_blobs(), &config(2)).unwrap();

        assert!(model.converged);
        assert_eq!(model.labels[0], model.labels[1]);
        assert_eq!(model.labels[1], model.labels[2]);
        assert_eq!(model.labels[3], model.labels[4]);
        assert_eq!(model.labels[4], model.labels[5]);
        assert_ne!(model.labels[0], model.labels[3]);
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let data = array![
            [1.0, 0.0, 3.0],
            [0.5, 2.0, 1.0],
            [4.0, 4.0, 0.0],
            [0.0, 1.0, 1.0],
            [2.0, 2.0, 2.0],
            [3.5, 0.5, 1.5],
            [1.0, 3.0, 0.0],
        ];
        let first = ClusterModel::fit(&data, &config(3)).unwrap();
        let second = ClusterModel::fit(&data, &config(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_predict_training_row_returns_its_label() {
        let data = two_blobs();
        let model = ClusterModel::fit(&data, &config(2)).unwrap();
        for (row, &label) in data.rows().into_iter().zip(&model.labels) {
            assert_eq!(model.predict(row), label);
        }
    }

    #[test]
    fn test_predict_ties_go_to_lowest_cluster() {
        let centroids = array![[1.0, 0.0], [-1.0, 0.0]];
        assert_eq!(predict(array![0.0, 0.0].view(), &centroids), 0);
        assert_eq!(predict(array![-0.9, 0.0].view(), &centroids), 1);
    }

    #[test]
    fn test_cluster_count_clamped_to_rows() {
        let data = array![[1.0], [2.0]];
        let model = ClusterModel::fit(&data, &config(5)).unwrap();
        assert_eq!(model.n_clusters(), 2);
        assert_eq!(model.labels.len(), 2);
    }

    #[test]
    fn test_identical_rows_do_not_fail() {
        let data = Array2::<f64>::zeros((4, 3));
        let model = ClusterModel::fit(&data, &config(3)).unwrap();
        assert!(model.labels.iter().all(|&l| l == 0));
        assert_eq!(model.inertia, 0.0);
    }

    #[test]
    fn test_zero_clusters_or_rows_are_numeric_errors() {
        let data = two_blobs();
        assert!(matches!(ClusterModel::fit(&data, &config(0)), Err(RecommendError::Numeric(_))));
        let empty = Array2::<f64>::zeros((0, 2));
        assert!(matches!(ClusterModel::fit(&empty, &config(2)), Err(RecommendError::Numeric(_))));
    }

    #[test]
    fn test_iteration_cap_is_not_an_error() {
        let capped = KMeansConfig {
            n_clusters: 2,
            max_iterations: 0,
            seed: 7,
        };
        let model = ClusterModel::fit(&two_blobs(), &capped).unwrap();
        assert!(!model.converged);
        assert_eq!(model.iterations, 0);
        assert_eq!(model.labels.len(), 6);
    }

    #[test]
    fn test_members_and_labels_by_user() {
        let matrix = RatingMatrix::build(&[10, 20, 30], &[1], &[]).unwrap();
        let model = ClusterModel {
            labels: vec![1, 0, 1],
            centroids: array![[0.0], [1.0]],
            iterations: 1,
            converged: true,
            inertia: 0.0,
        };
        assert_eq!(model.members(1), vec![0, 2]);
        let by_user = model.labels_by_user(&matrix);
        assert_eq!(by_user[&20], 0);
        assert_eq!(by_user[&30], 1);
    }
}
