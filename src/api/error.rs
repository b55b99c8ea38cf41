use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};

use super::models::ErrorBody;
use crate::errors::RecommendError;

/// Failure surfaced to HTTP clients as `{status, detail}` JSON.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: format!("An error occurred: {}", message),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::InvalidRating(_) => {
                warn!("Rejected request: {}", err);
                Self {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    detail: err.to_string(),
                }
            }
            _ if err.is_client_error() => {
                warn!("Request ended without result: {}", err);
                Self {
                    status: StatusCode::NOT_FOUND,
                    detail: err.to_string(),
                }
            }
            _ => {
                error!("Request failed: {:?}", err);
                Self::internal(err)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (RecommendError::UserNotFound(3), StatusCode::NOT_FOUND),
            (RecommendError::NoUnratedItems(3), StatusCode::NOT_FOUND),
            (RecommendError::NoRecommendations(3), StatusCode::NOT_FOUND),
            (RecommendError::Data("dangling rating".into()), StatusCode::NOT_FOUND),
            (RecommendError::InvalidRating(9.0), StatusCode::UNPROCESSABLE_ENTITY),
            (RecommendError::Numeric("zero items".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_internal_detail_carries_description() {
        let api_error = ApiError::from(RecommendError::Numeric("zero items".into()));
        assert_eq!(api_error.detail, "An error occurred: Degenerate numeric input: zero items");
    }
}
