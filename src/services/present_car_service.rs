//! Present-car sightings
//!
//! A sighting references its current and previous zone and the camera that
//! produced it. Sightings have no lifecycle state and are removed on exit.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::WriteOutcome;
use crate::database::repositories::PresentCarSeaOrmRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{
    EntityKind, PresentCar, PresentCarCreateRequest, PresentCarUpdateRequest, ReferenceSet,
};
use crate::services::lifecycle::DeleteOutcome;
use crate::services::validation::{ReferenceCheck, Validator};
use crate::store::with_deadline;

pub struct PresentCarService {
    repo: PresentCarSeaOrmRepository,
    validator: Arc<Validator>,
    operation_timeout: Duration,
}

fn sighting_checks(curr_zone_id: i32, last_zone_id: i32, camera_id: i32) -> [ReferenceCheck; 3] {
    [
        ReferenceCheck::new("curr_zone_id", ReferenceSet::Zone, curr_zone_id),
        ReferenceCheck::new("last_zone_id", ReferenceSet::Zone, last_zone_id),
        ReferenceCheck::new("camera_id", ReferenceSet::Camera, camera_id),
    ]
}

impl PresentCarService {
    pub fn new(
        repo: PresentCarSeaOrmRepository,
        validator: Arc<Validator>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            validator,
            operation_timeout,
        }
    }

    pub async fn create(
        &self,
        mut request: PresentCarCreateRequest,
    ) -> AppResult<WriteOutcome<PresentCar>> {
        let [curr_zone_id, last_zone_id, camera_id] = self.validator.resolve(
            EntityKind::PresentCar,
            sighting_checks(request.curr_zone_id, request.last_zone_id, request.camera_id),
        )?;
        request.curr_zone_id = curr_zone_id;
        request.last_zone_id = last_zone_id;
        request.camera_id = camera_id;

        let car = with_deadline(
            "create present car",
            self.operation_timeout,
            self.repo.create(request),
        )
        .await?;
        debug!("Recorded {} in zone {}", car.lpn, car.curr_zone_id);
        Ok(WriteOutcome::new(car, None))
    }

    pub async fn update(
        &self,
        id: i32,
        mut request: PresentCarUpdateRequest,
    ) -> AppResult<WriteOutcome<PresentCar>> {
        let [curr_zone_id, last_zone_id, camera_id] = self.validator.resolve(
            EntityKind::PresentCar,
            sighting_checks(request.curr_zone_id, request.last_zone_id, request.camera_id),
        )?;
        request.curr_zone_id = curr_zone_id;
        request.last_zone_id = last_zone_id;
        request.camera_id = camera_id;

        let car = with_deadline(
            "update present car",
            self.operation_timeout,
            self.repo.update(id, request),
        )
        .await?;
        Ok(WriteOutcome::new(car, None))
    }

    /// Update every sighting of `lpn`; references are checked as for `create`
    pub async fn update_by_lpn(
        &self,
        lpn: &str,
        mut request: PresentCarUpdateRequest,
    ) -> AppResult<Vec<PresentCar>> {
        if lpn.trim().is_empty() {
            return Err(AppError::validation("lpn must not be empty"));
        }
        let [curr_zone_id, last_zone_id, camera_id] = self.validator.resolve(
            EntityKind::PresentCar,
            sighting_checks(request.curr_zone_id, request.last_zone_id, request.camera_id),
        )?;
        request.curr_zone_id = curr_zone_id;
        request.last_zone_id = last_zone_id;
        request.camera_id = camera_id;

        let new_lpn = request.lpn.clone();
        let rows_affected = with_deadline(
            "update present cars by plate",
            self.operation_timeout,
            self.repo.update_by_lpn(lpn, request),
        )
        .await?;
        if rows_affected == 0 {
            return Err(AppError::not_found("present car", lpn));
        }
        debug!("Updated {} sighting(s) of {}", rows_affected, lpn);

        self.find_by_lpn(&new_lpn).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome> {
        let rows_affected = with_deadline(
            "delete present car",
            self.operation_timeout,
            self.repo.delete(id),
        )
        .await?;
        if rows_affected == 0 {
            return Err(AppError::not_found("present car", id));
        }
        Ok(DeleteOutcome {
            rows_affected,
            cache_warning: None,
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<PresentCar> {
        with_deadline(
            "get present car",
            self.operation_timeout,
            self.repo.find_by_id(id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("present car", id))
    }

    pub async fn list(&self, curr_zone_id: Option<i32>) -> AppResult<Vec<PresentCar>> {
        Ok(with_deadline(
            "list present cars",
            self.operation_timeout,
            self.repo.list(curr_zone_id),
        )
        .await?)
    }

    pub async fn find_by_lpn(&self, lpn: &str) -> AppResult<Vec<PresentCar>> {
        Ok(with_deadline(
            "find present car by plate",
            self.operation_timeout,
            self.repo.find_by_lpn(lpn),
        )
        .await?)
    }
}
