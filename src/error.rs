// src/error.rs
use http::StatusCode;
use thiserror::Error;

/// Failure taxonomy for remote calls.
///
/// A transport failure is always distinguishable from an empty result: an
/// empty list with `total = 0` is a successful response, never an error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response that is not one of the dedicated variants below.
    #[error("api error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    /// 401 from the backend. The session has already been cleared and
    /// flagged for re-authentication by the time this surfaces.
    #[error("unauthorized")]
    Unauthorized,

    /// 403 from the backend. Logged and surfaced, no forced navigation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
