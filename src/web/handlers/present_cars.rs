//! Present-car sighting handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{PresentCarCreateRequest, PresentCarUpdateRequest};
use crate::web::{
    AppState,
    responses::{handle_created, handle_result},
};

/// `?zone_id=` narrows to one zone, `?lpn=` looks a plate up instead
#[derive(Debug, Default, Deserialize)]
pub struct PresentCarQuery {
    pub zone_id: Option<i32>,
    pub lpn: Option<String>,
}

pub async fn list_present_cars(
    State(state): State<AppState>,
    Query(query): Query<PresentCarQuery>,
) -> Response {
    let service = &state.registry.present_cars;
    match query.lpn {
        Some(lpn) => handle_result(service.find_by_lpn(&lpn).await),
        None => handle_result(service.list(query.zone_id).await),
    }
}

pub async fn get_present_car(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.present_cars.get(id).await)
}

pub async fn create_present_car(
    State(state): State<AppState>,
    Json(request): Json<PresentCarCreateRequest>,
) -> Response {
    handle_created(state.registry.present_cars.create(request).await)
}

pub async fn update_present_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<PresentCarUpdateRequest>,
) -> Response {
    handle_result(state.registry.present_cars.update(id, request).await)
}

/// `PUT /present-cars?lpn=` rewrites every sighting of that plate
pub async fn update_present_cars_by_lpn(
    State(state): State<AppState>,
    Query(query): Query<PresentCarQuery>,
    Json(request): Json<PresentCarUpdateRequest>,
) -> Response {
    match query.lpn {
        Some(lpn) => handle_result(state.registry.present_cars.update_by_lpn(&lpn, request).await),
        None => handle_result::<()>(Err(AppError::validation("lpn query parameter is required"))),
    }
}

pub async fn delete_present_car(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    handle_result(state.registry.present_cars.delete(id).await)
}
