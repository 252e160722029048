//! Ufo handlers

use super::error::ApiError;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use posto_core::{CreateUfoRequest, FetchUfoRequest, ListUfosRequest, Ufo};
use serde::Deserialize;
use tower::ServiceExt;
use uuid::Uuid;

/// Absent fields decode to their zero value and are rejected by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUfoBody {
    model: String,
    licence: String,
    plate: String,
    tank: i64,
    fuel: String,
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateUfoBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Ufo>), ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let request = CreateUfoRequest {
        model: body.model,
        licence: body.licence,
        plate: body.plate,
        tank: body.tank,
        fuel: body.fuel,
    };
    let ufo = state
        .endpoints
        .create
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| ApiError::from_service("create ufo", e))?;

    Ok((StatusCode::CREATED, Json(ufo)))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Ufo>, ApiError> {
    let Path(id) = id.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    state
        .endpoints
        .fetch
        .clone()
        .oneshot(FetchUfoRequest { id })
        .await
        .map_err(|e| ApiError::from_service("get ufo", e))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Ufo>>, ApiError> {
    let ufos = state
        .endpoints
        .list
        .clone()
        .oneshot(ListUfosRequest)
        .await
        .map_err(|e| ApiError::from_service("list ufos", e))?;

    Ok(Json(ufos))
}
