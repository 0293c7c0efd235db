//! # Response Envelope & Error Contract
//!
//! Every endpoint returns an [`ApiResponse<T>`] envelope:
//!
//! ```json
//! { "data": { ... } }                                        // success
//! { "error": { "code": "not_found", "message": "..." } }     // failure
//! ```
//!
//! The HTTP status travels beside the envelope and is never serialized.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::PlateError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input, wrong number of image sources, or a failed
    /// validation. HTTP 400.
    InvalidRequest,
    /// The plate (or any plate, for multi-plate extraction) is unknown.
    /// HTTP 404.
    NotFound,
    /// Storage or upstream model failure. HTTP 500.
    InternalError,
    /// No vision model is configured. HTTP 503.
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

/// Structured error payload within the envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// HTTP 200.
    pub fn success(data: T) -> Self {
        Self::with_status(data, StatusCode::OK)
    }

    /// HTTP 203: the payload is a stand-in rather than a stored record.
    pub fn non_authoritative(data: T) -> Self {
        Self::with_status(data, StatusCode::NON_AUTHORITATIVE_INFORMATION)
    }

    fn with_status(data: T, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            error: None,
            status,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<PlateError> for ApiResponse<T> {
    /// Storage and internal failures are logged and answered with a generic
    /// message. Vision model failures keep their message.
    fn from(err: PlateError) -> Self {
        match err {
            PlateError::NotFound(msg) => ApiResponse::error(ErrorCode::NotFound, msg),

            PlateError::Validation(msg) => ApiResponse::error(ErrorCode::InvalidRequest, msg),

            PlateError::OcrUnavailable(msg) => {
                tracing::warn!(reason = %msg, "Extraction requested without a vision model");
                ApiResponse::error(
                    ErrorCode::ServiceUnavailable,
                    "Plate extraction is unavailable: no vision model is configured",
                )
            }

            ocr @ PlateError::Ocr(_) => {
                tracing::error!(error = %ocr, "Plate extraction failed");
                ApiResponse::error(ErrorCode::InternalError, ocr.to_string())
            }

            ref internal @ (PlateError::Database(_) | PlateError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}
