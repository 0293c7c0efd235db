use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};

use crate::api::dto::{Base64ImageRequest, ExtractQuery, ExtractUploadForm, PlateMatchResponse};
use crate::api::extractors::AppJson;
use crate::api::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::state::AppState;
use crate::ocr::ImageReference;
use crate::services::ExtractOutcome;

/// `POST /extract`
///
/// Exactly one of the `image_url` query parameter, the `base64_image` query
/// parameter or a multipart `file` field names the image.
#[utoipa::path(
    post,
    path = "/extract",
    tag = "extraction",
    operation_id = "extract.single",
    params(ExtractQuery),
    request_body(content = ExtractUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Plate read and matched", body = PlateMatchResponse),
        (status = 203, description = "No match; fixed stand-in record served", body = PlateMatchResponse),
        (status = 400, description = "Zero or several image sources, or unreadable image data", body = ApiError),
        (status = 404, description = "Plate read but not on record", body = ApiError),
        (status = 500, description = "Vision model call failed", body = ApiError),
        (status = 503, description = "No vision model configured", body = ApiError),
    )
)]
pub async fn extract_plate(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResponse<PlateMatchResponse> {
    let upload = match multipart {
        Ok(multipart) => match read_file_field(multipart).await {
            Ok(upload) => upload,
            Err(response) => return response,
        },
        Err(_) => None,
    };

    let image = match ImageReference::from_sources(query.image_url, upload, query.base64_image) {
        Ok(image) => image,
        Err(e) => return e.into(),
    };

    match state.extraction.extract(&image).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => e.into(),
    }
}

/// `POST /extract-base64`
#[utoipa::path(
    post,
    path = "/extract-base64",
    tag = "extraction",
    operation_id = "extract.base64",
    request_body = Base64ImageRequest,
    responses(
        (status = 200, description = "Plate read and matched", body = PlateMatchResponse),
        (status = 203, description = "No match; fixed stand-in record served", body = PlateMatchResponse),
        (status = 400, description = "Invalid or undersized base64 payload", body = ApiError),
        (status = 404, description = "Plate read but not on record", body = ApiError),
        (status = 500, description = "Vision model call failed", body = ApiError),
        (status = 503, description = "No vision model configured", body = ApiError),
    )
)]
pub async fn extract_plate_base64(
    State(state): State<AppState>,
    AppJson(req): AppJson<Base64ImageRequest>,
) -> ApiResponse<PlateMatchResponse> {
    let image = ImageReference::Base64(req.base64_image);

    match state.extraction.extract(&image).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => e.into(),
    }
}

/// `POST /extract-all-plates-base64`
#[utoipa::path(
    post,
    path = "/extract-all-plates-base64",
    tag = "extraction",
    operation_id = "extract.allBase64",
    request_body = Base64ImageRequest,
    responses(
        (status = 200, description = "One entry per distinct plate read", body = [PlateMatchResponse]),
        (status = 400, description = "Invalid or undersized base64 payload", body = ApiError),
        (status = 404, description = "No license plates found in image", body = ApiError),
        (status = 500, description = "Vision model call failed", body = ApiError),
        (status = 503, description = "No vision model configured", body = ApiError),
    )
)]
pub async fn extract_all_plates_base64(
    State(state): State<AppState>,
    AppJson(req): AppJson<Base64ImageRequest>,
) -> ApiResponse<Vec<PlateMatchResponse>> {
    let image = ImageReference::Base64(req.base64_image);

    match state.extraction.extract_all(&image).await {
        Ok(matches) => {
            ApiResponse::success(matches.into_iter().map(PlateMatchResponse::from).collect())
        }
        Err(e) => e.into(),
    }
}

fn outcome_response(outcome: ExtractOutcome) -> ApiResponse<PlateMatchResponse> {
    match outcome {
        ExtractOutcome::Found { plate, record } => {
            ApiResponse::success(PlateMatchResponse::matched(plate, record))
        }
        ExtractOutcome::Placeholder { record, .. } => {
            ApiResponse::non_authoritative(PlateMatchResponse::placeholder(record))
        }
        ExtractOutcome::NotFound { plate } => {
            ApiResponse::error(ErrorCode::NotFound, format!("License plate {plate} not found"))
        }
    }
}

/// Bytes of the `file` field, if the form has one. Other fields are ignored;
/// a malformed form is rejected even when another image source is given.
async fn read_file_field(
    mut multipart: Multipart,
) -> Result<Option<Vec<u8>>, ApiResponse<PlateMatchResponse>> {
    let mut file_bytes: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(ApiResponse::error(
                    ErrorCode::InvalidRequest,
                    format!("Failed to read file: {e}"),
                ));
            }
        };
        if field.name() != Some("file") {
            continue;
        }

        match field.bytes().await {
            Ok(bytes) => file_bytes = Some(bytes.to_vec()),
            Err(e) => {
                return Err(ApiResponse::error(
                    ErrorCode::InvalidRequest,
                    format!("Failed to read file: {e}"),
                ));
            }
        }
    }

    Ok(file_bytes)
}
