use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.server.body_limit;

    let plates = Router::new()
        .route("/plates", get(handlers::plates::list_plates))
        .route("/plate", post(handlers::plates::add_plate))
        .route(
            "/plate/{plate_number}",
            get(handlers::plates::get_plate).delete(handlers::plates::delete_plate),
        )
        .route(
            "/plate/{plate_number}/alerts",
            get(handlers::plates::get_plate_alerts),
        );

    let extraction = Router::new()
        .route("/extract", post(handlers::extraction::extract_plate))
        .route(
            "/extract-base64",
            post(handlers::extraction::extract_plate_base64),
        )
        .route(
            "/extract-all-plates-base64",
            post(handlers::extraction::extract_all_plates_base64),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router());

    Router::new()
        .merge(public_routes)
        .merge(plates)
        .merge(extraction)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
