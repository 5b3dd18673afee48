//! Sign handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};

use super::{ListQuery, StateChangeRequest};
use crate::models::{SignCreateRequest, SignUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

pub async fn list_signs(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    handle_result(state.registry.signs.list(query.filter).await)
}

pub async fn get_sign(State(state): State<AppState>, Path(sign_id): Path<i32>) -> Response {
    handle_result(state.registry.signs.get(sign_id).await)
}

pub async fn create_sign(
    State(state): State<AppState>,
    Json(request): Json<SignCreateRequest>,
) -> Response {
    handle_created(state.registry.signs.create(request).await)
}

pub async fn update_sign(
    State(state): State<AppState>,
    Path(sign_id): Path<i32>,
    Json(request): Json<SignUpdateRequest>,
) -> Response {
    handle_result(state.registry.signs.update(sign_id, request).await)
}

pub async fn set_sign_state(
    State(state): State<AppState>,
    Path(sign_id): Path<i32>,
    Json(request): Json<StateChangeRequest>,
) -> Response {
    handle_result(state.registry.signs.set_enabled(sign_id, request.enabled).await)
}

pub async fn delete_sign(State(state): State<AppState>, Path(sign_id): Path<i32>) -> Response {
    handle_result(state.registry.signs.delete(sign_id).await)
}
