//! Error responses of the registry API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::request::RequestError;

/// Errors returned to API callers. All of them are client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejecting request");
        (self.status(), self.to_string()).into_response()
    }
}
