use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ApiResponse;

#[derive(Error, Debug)]
pub enum PlateError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to process image: {0}")]
    Ocr(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl PlateError {
    pub fn status(&self) -> StatusCode {
        match self {
            PlateError::NotFound(_) => StatusCode::NOT_FOUND,
            PlateError::Validation(_) => StatusCode::BAD_REQUEST,
            PlateError::OcrUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PlateError::Database(_) | PlateError::Ocr(_) | PlateError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for PlateError {
    fn from(errors: validator::ValidationErrors) -> Self {
        PlateError::Validation(errors.to_string())
    }
}

impl IntoResponse for PlateError {
    /// Errors raised outside a handler body (extractor rejections) still
    /// leave in the standard response envelope.
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PlateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PlateError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlateError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlateError::Ocr("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PlateError::OcrUnavailable("no key".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_ocr_error_carries_upstream_message() {
        let err = PlateError::Ocr("connection reset".into());
        assert_eq!(err.to_string(), "Failed to process image: connection reset");
    }
}
