//! Carpark handlers

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};

use crate::models::{CarparkCreateRequest, CarparkUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

pub async fn list_carparks(State(state): State<AppState>) -> Response {
    handle_result(state.registry.carparks.list().await)
}

pub async fn get_carpark(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.carparks.get(id).await)
}

pub async fn create_carpark(
    State(state): State<AppState>,
    Json(request): Json<CarparkCreateRequest>,
) -> Response {
    handle_created(state.registry.carparks.create(request).await)
}

pub async fn update_carpark(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CarparkUpdateRequest>,
) -> Response {
    handle_result(state.registry.carparks.update(id, request).await)
}

/// Hard delete; the carpark set is refreshed afterwards
pub async fn delete_carpark(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.carparks.delete(id).await)
}
