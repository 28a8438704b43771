//! Error handlers
//!
//! Maps storage errors onto HTTP responses. Not-found responses carry no
//! body; internal failures surface as a generic server error while the
//! underlying cause goes to the operator log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::error::types::StorageError;

/// Convert error to HTTP status code
pub fn error_to_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::PathTraversal(_) => StatusCode::BAD_REQUEST,
        StorageError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        StorageError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let status = error_to_status(&self);

        match &self {
            StorageError::PathTraversal(p) => {
                warn!("Rejected path traversal attempt: {}", p);
            }
            StorageError::IoError(e) => {
                error!("Storage I/O error: {}", e);
            }
            _ => {}
        }

        if status == StatusCode::NOT_FOUND {
            status.into_response()
        } else if status.is_client_error() {
            (status, "Invalid path").into_response()
        } else {
            (status, "Server error").into_response()
        }
    }
}
