use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of the single outbound document fetch.
///
/// Terminal for the whole extraction: there is no partial preview when the
/// document itself cannot be obtained. Retrying is the caller's decision.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors surfaced by the unfurling engine.
///
/// A missing preview field is never an error. Only an unusable input URL
/// (rejected before any network attempt) or a failed fetch aborts extraction.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("invalid preview target: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Internal server error")]
    Internal,
}

impl From<PreviewError> for AppError {
    fn from(e: PreviewError) -> Self {
        match e {
            PreviewError::InvalidUrl(msg) => AppError::Validation(msg),
            PreviewError::Fetch(e) => AppError::UpstreamFetch(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpstreamFetch(msg) => {
                tracing::warn!("Upstream fetch failed: {msg}");
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::Internal => {
                tracing::error!("Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
