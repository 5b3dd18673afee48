//! Camera handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};

use super::{ListQuery, StateChangeRequest};
use crate::models::{CameraCreateRequest, CameraUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

pub async fn list_cameras(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    handle_result(state.registry.cameras.list(query.filter).await)
}

pub async fn get_camera(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.cameras.get(id).await)
}

pub async fn create_camera(
    State(state): State<AppState>,
    Json(request): Json<CameraCreateRequest>,
) -> Response {
    handle_created(state.registry.cameras.create(request).await)
}

pub async fn update_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CameraUpdateRequest>,
) -> Response {
    handle_result(state.registry.cameras.update(id, request).await)
}

pub async fn set_camera_state(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<StateChangeRequest>,
) -> Response {
    handle_result(state.registry.cameras.set_enabled(id, request.enabled).await)
}

pub async fn delete_camera(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.cameras.delete(id).await)
}
