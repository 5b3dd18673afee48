//! Zone image handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::models::{ZoneImageCreateRequest, ZoneImageUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

#[derive(Debug, Default, Deserialize)]
pub struct ZoneImageQuery {
    pub lang: Option<String>,
}

pub async fn list_zone_images(
    State(state): State<AppState>,
    Path(zone_id): Path<i32>,
    Query(query): Query<ZoneImageQuery>,
) -> Response {
    handle_result(
        state
            .registry
            .zone_images
            .list_by_zone(zone_id, query.lang.as_deref())
            .await,
    )
}

pub async fn get_zone_image(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.zone_images.get(id).await)
}

pub async fn create_zone_image(
    State(state): State<AppState>,
    Json(request): Json<ZoneImageCreateRequest>,
) -> Response {
    handle_created(state.registry.zone_images.create(request).await)
}

pub async fn update_zone_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ZoneImageUpdateRequest>,
) -> Response {
    handle_result(state.registry.zone_images.update(id, request).await)
}

pub async fn delete_zone_image(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.zone_images.delete(id).await)
}
