use axum::extract::State;
use serde::Serialize;

use crate::api::response::ApiResponse;
use crate::api::state::AppState;

/// Health data returned inside the envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub store: StoreStatus,
    pub ocr: OcrStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StoreStatus {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<u64>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OcrStatus {
    pub status: String,
    pub model: String,
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let backend = state.plates.backend_name().to_string();
    let store = match state.plates.count().await {
        Ok(records) => StoreStatus {
            status: "ok".to_string(),
            backend,
            records: Some(records),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Plate store health probe failed");
            StoreStatus {
                status: "error".to_string(),
                backend,
                records: None,
            }
        }
    };

    let provider = state.extraction.ocr();
    let ocr = OcrStatus {
        status: if provider.is_available() {
            "available".to_string()
        } else {
            "unavailable".to_string()
        },
        model: provider.model().to_string(),
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
        ocr,
    })
}
