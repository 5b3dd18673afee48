//! Zone handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};

use super::{ListQuery, StateChangeRequest};
use crate::models::{ZoneCreateRequest, ZoneUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

pub async fn list_zones(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    handle_result(state.registry.zones.list(query.filter).await)
}

/// Live zones belonging to one carpark
pub async fn list_carpark_zones(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.zones.list_by_carpark(id).await)
}

pub async fn get_zone(State(state): State<AppState>, Path(zone_id): Path<i32>) -> Response {
    handle_result(state.registry.zones.get(zone_id).await)
}

pub async fn create_zone(
    State(state): State<AppState>,
    Json(request): Json<ZoneCreateRequest>,
) -> Response {
    handle_created(state.registry.zones.create(request).await)
}

pub async fn update_zone(
    State(state): State<AppState>,
    Path(zone_id): Path<i32>,
    Json(request): Json<ZoneUpdateRequest>,
) -> Response {
    handle_result(state.registry.zones.update(zone_id, request).await)
}

pub async fn set_zone_state(
    State(state): State<AppState>,
    Path(zone_id): Path<i32>,
    Json(request): Json<StateChangeRequest>,
) -> Response {
    handle_result(state.registry.zones.set_enabled(zone_id, request.enabled).await)
}

pub async fn delete_zone(State(state): State<AppState>, Path(zone_id): Path<i32>) -> Response {
    handle_result(state.registry.zones.delete(zone_id).await)
}
