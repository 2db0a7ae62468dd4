pub mod auth;
pub mod parcels;
pub mod tolls;
pub mod trucks;

use axum::{
    http::{StatusCode, Uri},
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn root() -> &'static str {
    "Welcome to LogiTrack API. Visit /api/auth, /api/trucks, /api/parcels, or /api/tolls."
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, format!("Not Found - {}", uri.path()))
}

/// Build the full application router: public routes, the bearer-protected
/// `/api` resources, API docs and the JSON 404 fallback.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout));

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/trucks", get(trucks::list).post(trucks::create))
        .route("/api/trucks/fleet-summary", get(trucks::fleet_summary))
        .route("/api/trucks/:id", get(trucks::get).put(trucks::update).delete(trucks::delete))
        .route("/api/parcels", get(parcels::list).post(parcels::create))
        .route("/api/parcels/:id", get(parcels::get).put(parcels::update).delete(parcels::delete))
        .route("/api/tolls", get(tolls::list).post(tolls::create))
        .route("/api/tolls/truck/:truck_id", get(tolls::by_truck))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token_state));

    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
