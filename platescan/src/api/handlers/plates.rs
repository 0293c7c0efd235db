use axum::extract::{Path, State};

use crate::api::dto::MessageResponse;
use crate::api::extractors::AppJson;
use crate::api::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::state::AppState;
use crate::models::{PlateRecord, PlateSearchResult};

const NOT_FOUND_MESSAGE: &str = "License plate not found";

/// `GET /plates`
#[utoipa::path(
    get,
    path = "/plates",
    tag = "plates",
    operation_id = "plates.list",
    responses(
        (status = 200, description = "All plate records ordered by plate number", body = [PlateRecord]),
    )
)]
pub async fn list_plates(State(state): State<AppState>) -> ApiResponse<Vec<PlateRecord>> {
    match state.plates.list().await {
        Ok(records) => ApiResponse::success(records),
        Err(e) => e.into(),
    }
}

/// `GET /plate/{plate_number}`
#[utoipa::path(
    get,
    path = "/plate/{plate_number}",
    tag = "plates",
    operation_id = "plates.get",
    params(("plate_number" = String, Path, description = "Plate number, any case")),
    responses(
        (status = 200, description = "Record and its alerts", body = PlateSearchResult),
        (status = 404, description = "Plate not found", body = ApiError),
    )
)]
pub async fn get_plate(
    State(state): State<AppState>,
    Path(plate_number): Path<String>,
) -> ApiResponse<PlateSearchResult> {
    match state.plates.search_with_alerts(&plate_number).await {
        Ok(result) if result.found => ApiResponse::success(result),
        Ok(_) => ApiResponse::error(ErrorCode::NotFound, NOT_FOUND_MESSAGE),
        Err(e) => e.into(),
    }
}

/// `POST /plate`
#[utoipa::path(
    post,
    path = "/plate",
    tag = "plates",
    operation_id = "plates.add",
    request_body = PlateRecord,
    responses(
        (status = 200, description = "Record stored (inserted or replaced)", body = MessageResponse),
        (status = 400, description = "Invalid record", body = ApiError),
    )
)]
pub async fn add_plate(
    State(state): State<AppState>,
    AppJson(record): AppJson<PlateRecord>,
) -> ApiResponse<MessageResponse> {
    match state.plates.add(record).await {
        Ok(stored) => ApiResponse::success(MessageResponse::new(format!(
            "License plate {} added successfully",
            stored.plate_number
        ))),
        Err(e) => e.into(),
    }
}

/// `DELETE /plate/{plate_number}`
#[utoipa::path(
    delete,
    path = "/plate/{plate_number}",
    tag = "plates",
    operation_id = "plates.remove",
    params(("plate_number" = String, Path, description = "Plate number, any case")),
    responses(
        (status = 200, description = "Record removed", body = MessageResponse),
        (status = 404, description = "Plate not found", body = ApiError),
    )
)]
pub async fn delete_plate(
    State(state): State<AppState>,
    Path(plate_number): Path<String>,
) -> ApiResponse<MessageResponse> {
    match state.plates.remove(&plate_number).await {
        Ok(removed) => ApiResponse::success(MessageResponse::new(format!(
            "License plate {removed} removed successfully"
        ))),
        Err(e) => e.into(),
    }
}

/// `GET /plate/{plate_number}/alerts`
#[utoipa::path(
    get,
    path = "/plate/{plate_number}/alerts",
    tag = "plates",
    operation_id = "plates.alerts",
    params(("plate_number" = String, Path, description = "Plate number, any case")),
    responses(
        (status = 200, description = "Alert strings, possibly empty", body = [String]),
        (status = 404, description = "Plate not found", body = ApiError),
    )
)]
pub async fn get_plate_alerts(
    State(state): State<AppState>,
    Path(plate_number): Path<String>,
) -> ApiResponse<Vec<String>> {
    match state.plates.search_with_alerts(&plate_number).await {
        Ok(result) if result.found => ApiResponse::success(result.alerts),
        Ok(_) => ApiResponse::error(ErrorCode::NotFound, NOT_FOUND_MESSAGE),
        Err(e) => e.into(),
    }
}
