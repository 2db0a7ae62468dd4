use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use models::truck;
use service::fleet::FleetSummary;
use service::policy::Principal;
use service::truck::domain::{TruckInput, TruckPatch, TruckRecord};

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/trucks", tag = "trucks", responses((status = 200, description = "All trucks with their parcels", body = [crate::openapi::TruckDoc]), (status = 403, description = "Not authorized as an admin")), security(("bearer" = [])))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<TruckRecord>>, ApiError> {
    Ok(Json(state.services.trucks.list(&principal).await?))
}

#[utoipa::path(post, path = "/api/trucks", tag = "trucks", request_body = crate::openapi::TruckInputDoc, responses((status = 201, description = "Created", body = crate::openapi::TruckDoc), (status = 400, description = "Missing or out-of-range field"), (status = 403, description = "Not authorized as an admin")), security(("bearer" = [])))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    AppJson(input): AppJson<TruckInput>,
) -> Result<(StatusCode, Json<truck::Model>), ApiError> {
    let created = state.services.trucks.create(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/trucks/{id}", tag = "trucks", params(("id" = String, Path, description = "Truck id")), responses((status = 200, description = "Truck with its parcels", body = crate::openapi::TruckDoc), (status = 404, description = "Truck not found")), security(("bearer" = [])))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<TruckRecord>, ApiError> {
    Ok(Json(state.services.trucks.get(&principal, &id).await?))
}

#[utoipa::path(put, path = "/api/trucks/{id}", tag = "trucks", params(("id" = String, Path, description = "Truck id")), request_body = crate::openapi::TruckPatchDoc, responses((status = 200, description = "Updated", body = crate::openapi::TruckDoc), (status = 404, description = "Truck not found")), security(("bearer" = [])))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<TruckPatch>,
) -> Result<Json<truck::Model>, ApiError> {
    Ok(Json(state.services.trucks.update(&principal, &id, patch).await?))
}

#[utoipa::path(delete, path = "/api/trucks/{id}", tag = "trucks", params(("id" = String, Path, description = "Truck id")), responses((status = 200, description = "Truck removed"), (status = 404, description = "Truck not found")), security(("bearer" = [])))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.services.trucks.delete(&principal, &id).await?;
    Ok(Json(json!({ "message": "Truck removed" })))
}

#[utoipa::path(get, path = "/api/trucks/fleet-summary", tag = "trucks", responses((status = 200, description = "Fleet totals and efficiency", body = crate::openapi::FleetSummaryDoc), (status = 403, description = "Not authorized as an admin")), security(("bearer" = [])))]
pub async fn fleet_summary(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<FleetSummary>, ApiError> {
    Ok(Json(state.services.trucks.fleet_summary(&principal).await?))
}
