use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Failure to retrieve the upstream results page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),

    #[error("could not visit page: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream responded with status {0}")]
    Status(reqwest::StatusCode),
}

/// Request-level failures, each mapped to a distinct HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("bad request: {0}")]
    BadInput(String),

    #[error("too many requests")]
    RateLimited,

    #[error(transparent)]
    Upstream(#[from] FetchError),

    #[error("internal error: {0}")]
    Internal(String),
}

// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadInput(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadInput(_) => "BAD_INPUT",
            Self::RateLimited => "RATE_LIMITED",
            Self::Upstream(_) => "UPSTREAM_FAILURE",
            Self::Internal(_) => "INTERNAL_FAILURE",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // upstream and internal details stay in the server log
        let error = match &self {
            Self::BadInput(_) | Self::RateLimited => self.to_string(),
            Self::Upstream(_) => "upstream fetch failed".to_string(),
            Self::Internal(_) => "internal server error".to_string(),
        };
        let body = ErrorResponse {
            error,
            code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}
