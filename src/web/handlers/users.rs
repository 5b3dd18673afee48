//! User handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};

use super::{ListQuery, StateChangeRequest};
use crate::models::{UserCreateRequest, UserUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

pub async fn list_users(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    handle_result(state.registry.users.list(query.filter).await)
}

pub async fn get_user(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    handle_result(state.registry.users.get(&username).await)
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<UserCreateRequest>,
) -> Response {
    handle_created(state.registry.users.create(request).await)
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<UserUpdateRequest>,
) -> Response {
    handle_result(state.registry.users.update(&username, request).await)
}

pub async fn set_user_state(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<StateChangeRequest>,
) -> Response {
    handle_result(
        state
            .registry
            .users
            .set_enabled(&username, request.enabled)
            .await,
    )
}

pub async fn delete_user(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    handle_result(state.registry.users.delete(&username).await)
}
