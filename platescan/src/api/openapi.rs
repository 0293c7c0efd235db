use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Platescan API",
        version = "0.1.0",
        description = "License-plate record lookup with plate extraction from images.",
    ),
    paths(
        handlers::health::health_check,
        handlers::plates::list_plates,
        handlers::plates::get_plate,
        handlers::plates::add_plate,
        handlers::plates::delete_plate,
        handlers::plates::get_plate_alerts,
        handlers::extraction::extract_plate,
        handlers::extraction::extract_plate_base64,
        handlers::extraction::extract_all_plates_base64,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Records
        models::PlateRecord,
        models::PlateSearchResult,
        dto::MessageResponse,
        // Extraction
        dto::Base64ImageRequest,
        dto::ExtractUploadForm,
        dto::PlateMatchResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::StoreStatus,
        handlers::health::OcrStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "plates", description = "Plate record lookup, alerts and maintenance"),
        (name = "extraction", description = "Plate extraction from images"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
