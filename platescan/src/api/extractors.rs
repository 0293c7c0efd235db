use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::PlateError;

/// `axum::Json` whose rejections leave in the standard error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(PlateError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for PlateError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> PlateError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                PlateError::Validation(format!("Missing required field: {field}"))
            } else {
                PlateError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            PlateError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            PlateError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(err) => {
            PlateError::Validation(format!("Failed to read request body: {}", err.body_text()))
        }
        _ => PlateError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
