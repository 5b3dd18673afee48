//! Camera service
//!
//! Cameras point at an entry and an exit zone and back the camera reference
//! set used by sightings.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{WriteOutcome, refresh_after_write};
use crate::database::repositories::{CameraSeaOrmRepository, LifecycleFilter};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Camera, CameraCreateRequest, CameraUpdateRequest, EntityKey, EntityKind, ReferenceSet,
};
use crate::services::lifecycle::{DeleteOutcome, LifecycleGuard, Transition};
use crate::services::reference_cache::ReferenceCache;
use crate::services::validation::{ReferenceCheck, Validator};
use crate::store::with_deadline;

pub struct CameraService {
    repo: CameraSeaOrmRepository,
    validator: Arc<Validator>,
    guard: Arc<LifecycleGuard>,
    cache: Arc<ReferenceCache>,
    operation_timeout: Duration,
}

fn zone_checks(zone_id_in: i32, zone_id_out: i32) -> [ReferenceCheck; 2] {
    [
        ReferenceCheck::new("zone_id_in", ReferenceSet::Zone, zone_id_in),
        ReferenceCheck::new("zone_id_out", ReferenceSet::Zone, zone_id_out),
    ]
}

impl CameraService {
    pub fn new(
        repo: CameraSeaOrmRepository,
        validator: Arc<Validator>,
        guard: Arc<LifecycleGuard>,
        cache: Arc<ReferenceCache>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            validator,
            guard,
            cache,
            operation_timeout,
        }
    }

    pub async fn create(
        &self,
        mut request: CameraCreateRequest,
    ) -> AppResult<WriteOutcome<Camera>> {
        let [zone_id_in, zone_id_out] = self.validator.resolve(
            EntityKind::Camera,
            zone_checks(request.zone_id_in, request.zone_id_out),
        )?;
        request.zone_id_in = zone_id_in;
        request.zone_id_out = zone_id_out;

        let camera = with_deadline(
            "create camera",
            self.operation_timeout,
            self.repo.create(request),
        )
        .await?;
        info!(
            "Created camera {} ({}), zones {} -> {}",
            camera.id, camera.cam_name, camera.zone_id_in, camera.zone_id_out
        );

        let cache_warning = refresh_after_write(&self.cache, ReferenceSet::Camera).await;
        Ok(WriteOutcome::new(camera, cache_warning))
    }

    pub async fn update(
        &self,
        id: i32,
        mut request: CameraUpdateRequest,
    ) -> AppResult<WriteOutcome<Camera>> {
        let [zone_id_in, zone_id_out] = self.validator.resolve(
            EntityKind::Camera,
            zone_checks(request.zone_id_in, request.zone_id_out),
        )?;
        request.zone_id_in = zone_id_in;
        request.zone_id_out = zone_id_out;

        let camera = with_deadline(
            "update camera",
            self.operation_timeout,
            self.repo.update(id, request),
        )
        .await?;

        let cache_warning = refresh_after_write(&self.cache, ReferenceSet::Camera).await;
        Ok(WriteOutcome::new(camera, cache_warning))
    }

    pub async fn set_enabled(&self, id: i32, enabled: bool) -> AppResult<Transition> {
        self.guard
            .set_enabled(EntityKind::Camera, &EntityKey::Int(id), enabled)
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome> {
        self.guard
            .soft_delete(EntityKind::Camera, &EntityKey::Int(id))
            .await
    }

    pub async fn get(&self, id: i32) -> AppResult<Camera> {
        with_deadline("get camera", self.operation_timeout, self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("camera", id))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> AppResult<Vec<Camera>> {
        Ok(with_deadline("list cameras", self.operation_timeout, self.repo.list(filter)).await?)
    }
}
