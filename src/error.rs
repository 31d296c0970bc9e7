// Error types for the gist gateway.
// FetchError is what the fetch path produces (and caches); ApiError is what handlers return.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    RateLimited,
    UpstreamError,
    Timeout,
    TransportError,
    InternalError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("GitHub API error: {0}")]
    Upstream(u16),

    #[error("Request to GitHub API timed out")]
    Timeout,

    #[error("Error connecting to GitHub API: {0}")]
    Transport(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::NotFound(_) => FailureKind::NotFound,
            FetchError::RateLimited => FailureKind::RateLimited,
            FetchError::Upstream(_) => FailureKind::UpstreamError,
            FetchError::Timeout => FailureKind::Timeout,
            FetchError::Transport(_) => FailureKind::TransportError,
            FetchError::Internal(_) => FailureKind::InternalError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            FailureKind::UpstreamError
            | FailureKind::Timeout
            | FailureKind::TransportError
            | FailureKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Fetch(e) => e.status_code(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
