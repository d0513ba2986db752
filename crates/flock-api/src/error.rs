use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use flock_social::SocialError;
use flock_types::api::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Social(#[from] SocialError),

    #[error("Authentication credentials were not provided or are invalid.")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    /// Failures outside the store (password hashing, token signing).
    #[error("Internal server error.")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Social(e) => match e {
                SocialError::NotFound(_) | SocialError::LikeNotFound => StatusCode::NOT_FOUND,
                SocialError::SelfFollow
                | SocialError::AlreadyLiked
                | SocialError::Validation(_) => StatusCode::BAD_REQUEST,
                SocialError::Forbidden => StatusCode::FORBIDDEN,
                SocialError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Social(e) => e.kind(),
            Self::Unauthorized => "unauthorized",
            Self::BadRequest(_) => "bad_request",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Social(SocialError::Unavailable(e)) => error!("Storage failure: {:#}", e),
            Self::Internal(msg) => error!("Internal error: {}", msg),
            _ => {}
        }

        let body = ErrorBody {
            detail: self.to_string(),
            kind: self.kind().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
