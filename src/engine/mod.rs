pub mod kmeans;
pub mod matrix;
pub mod pipeline;
pub mod recommend;
pub mod scaler;
pub mod types;

pub use kmeans::{predict, ClusterModel, KMeansConfig};
pub use matrix::RatingMatrix;
pub use pipeline::{fit, FittedModel};
pub use recommend::recommend;
pub use scaler::{ScalerState, StandardScaler};
pub use types::{ClusterId, ItemId, RankingPolicy, Rating, Recommendation, UserId};
