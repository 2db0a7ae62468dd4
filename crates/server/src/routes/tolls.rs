use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use models::toll;
use service::policy::Principal;
use service::toll::domain::{TollInput, TollRecord};

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/tolls", tag = "tolls", responses((status = 200, description = "All tolls with their truck", body = [crate::openapi::TollDoc]), (status = 403, description = "Not authorized as an admin")), security(("bearer" = [])))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<TollRecord>>, ApiError> {
    Ok(Json(state.services.tolls.list(&principal).await?))
}

#[utoipa::path(post, path = "/api/tolls", tag = "tolls", request_body = crate::openapi::TollInputDoc, responses((status = 201, description = "Recorded and charged to the truck", body = crate::openapi::TollDoc), (status = 400, description = "Missing field"), (status = 404, description = "Truck not found")), security(("bearer" = [])))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    AppJson(input): AppJson<TollInput>,
) -> Result<(StatusCode, Json<toll::Model>), ApiError> {
    let created = state.services.tolls.create(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/tolls/truck/{truck_id}", tag = "tolls", params(("truck_id" = String, Path, description = "Truck id")), responses((status = 200, description = "Tolls charged to the truck", body = [crate::openapi::TollDoc])), security(("bearer" = [])))]
pub async fn by_truck(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(truck_id): Path<String>,
) -> Result<Json<Vec<toll::Model>>, ApiError> {
    Ok(Json(state.services.tolls.list_by_truck(&principal, &truck_id).await?))
}
