//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Every expected outcome of a single engine operation. None of these is
/// fatal to the process; each maps to one stable status code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("the requested {0} id is not a well-formed id")]
    MalformedId(String),
    #[error("query parameter '{0}' must be an integer")]
    MalformedParameter(String),
    #[error("{0}")]
    ValidationFailed(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store: {0}")]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MalformedId(_) => (StatusCode::BAD_REQUEST, "malformed_id"),
            AppError::MalformedParameter(_) => (StatusCode::BAD_REQUEST, "malformed_parameter"),
            AppError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
