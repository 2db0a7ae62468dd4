use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use models::parcel;
use service::parcel::domain::{ParcelInput, ParcelPatch, ParcelRecord};
use service::policy::Principal;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/parcels", tag = "parcels", responses((status = 200, description = "All parcels for admins, own parcels for customers", body = [crate::openapi::ParcelDoc]), (status = 403, description = "Not authorized to view parcels")), security(("bearer" = [])))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<ParcelRecord>>, ApiError> {
    Ok(Json(state.services.parcels.list(&principal).await?))
}

#[utoipa::path(post, path = "/api/parcels", tag = "parcels", request_body = crate::openapi::ParcelInputDoc, responses((status = 201, description = "Created", body = crate::openapi::ParcelDoc), (status = 400, description = "Missing field"), (status = 403, description = "Only customers can create parcels")), security(("bearer" = [])))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    AppJson(input): AppJson<ParcelInput>,
) -> Result<(StatusCode, Json<parcel::Model>), ApiError> {
    let created = state.services.parcels.create(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/parcels/{id}", tag = "parcels", params(("id" = String, Path, description = "Parcel id")), responses((status = 200, description = "Parcel with its owner", body = crate::openapi::ParcelDoc), (status = 403, description = "Not the owner"), (status = 404, description = "Parcel not found")), security(("bearer" = [])))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<ParcelRecord>, ApiError> {
    Ok(Json(state.services.parcels.get(&principal, &id).await?))
}

#[utoipa::path(put, path = "/api/parcels/{id}", tag = "parcels", params(("id" = String, Path, description = "Parcel id")), request_body = crate::openapi::ParcelPatchDoc, responses((status = 200, description = "Updated", body = crate::openapi::ParcelDoc), (status = 403, description = "Not authorized to update this parcel"), (status = 404, description = "Parcel not found")), security(("bearer" = [])))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<ParcelPatch>,
) -> Result<Json<parcel::Model>, ApiError> {
    Ok(Json(state.services.parcels.update(&principal, &id, patch).await?))
}

#[utoipa::path(delete, path = "/api/parcels/{id}", tag = "parcels", params(("id" = String, Path, description = "Parcel id")), responses((status = 200, description = "Parcel removed"), (status = 403, description = "Not authorized to delete this parcel"), (status = 404, description = "Parcel not found")), security(("bearer" = [])))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.services.parcels.delete(&principal, &id).await?;
    Ok(Json(json!({ "message": "Parcel removed" })))
}
