use thiserror::Error;

use crate::engine::types::{ItemId, UserId};

/// Failure taxonomy of a single recommendation or rating request.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("User with id {0} not found")]
    UserNotFound(UserId),

    #[error("No new movies left to recommend for user {0}")]
    NoUnratedItems(UserId),

    #[error("No suitable movie recommendations found for user {0}")]
    NoRecommendations(UserId),

    #[error("Movie with id {0} not found")]
    MovieNotFound(ItemId),

    #[error("Rating {0} is outside the allowed range 1.0-5.0")]
    InvalidRating(f64),

    #[error("Inconsistent rating data: {0}")]
    Data(String),

    #[error("Degenerate numeric input: {0}")]
    Numeric(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl RecommendError {
    /// Caller-side failures that end the request without indicating a fault in the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RecommendError::Numeric(_) | RecommendError::Storage(_))
    }
}

pub type RecommendResult<T> = Result<T, RecommendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(RecommendError::UserNotFound(1).is_client_error());
        assert!(RecommendError::NoUnratedItems(1).is_client_error());
        assert!(RecommendError::NoRecommendations(1).is_client_error());
        assert!(RecommendError::Data("bad".into()).is_client_error());
        assert!(!RecommendError::Numeric("zero users".into()).is_client_error());
        assert!(!RecommendError::Storage(anyhow::anyhow!("disk")).is_client_error());
    }

    #[test]
    fn test_messages_carry_ids() {
        assert_eq!(RecommendError::UserNotFound(7).to_string(), "User with id 7 not found");
        assert_eq!(
            RecommendError::InvalidRating(6.5).to_string(),
            "Rating 6.5 is outside the allowed range 1.0-5.0"
        );
    }
}
