//! Client credential handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};

use super::{ListQuery, StateChangeRequest};
use crate::models::{ClientCredentialCreateRequest, ClientCredentialUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    handle_result(state.registry.clients.list(query.filter).await)
}

pub async fn get_client(State(state): State<AppState>, Path(client_id): Path<String>) -> Response {
    handle_result(state.registry.clients.get(&client_id).await)
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<ClientCredentialCreateRequest>,
) -> Response {
    handle_created(state.registry.clients.create(request).await)
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(request): Json<ClientCredentialUpdateRequest>,
) -> Response {
    handle_result(state.registry.clients.update(&client_id, request).await)
}

pub async fn set_client_state(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(request): Json<StateChangeRequest>,
) -> Response {
    handle_result(
        state
            .registry
            .clients
            .set_enabled(&client_id, request.enabled)
            .await,
    )
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Response {
    handle_result(state.registry.clients.delete(&client_id).await)
}
