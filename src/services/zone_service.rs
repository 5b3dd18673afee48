//! Zone service
//!
//! Zones reference a carpark and back the zone reference set that cameras,
//! signs, sightings and zone images are validated against.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{WriteOutcome, refresh_after_write};
use crate::database::repositories::{LifecycleFilter, ZoneSeaOrmRepository};
use crate::errors::{AppError, AppResult};
use crate::models::{
    EntityKey, EntityKind, ReferenceSet, UNASSIGNED_ID, Zone, ZoneCreateRequest, ZoneUpdateRequest,
};
use crate::services::lifecycle::{DeleteOutcome, LifecycleGuard, Transition};
use crate::services::reference_cache::ReferenceCache;
use crate::services::validation::{ReferenceCheck, Validator};
use crate::store::with_deadline;

pub struct ZoneService {
    repo: ZoneSeaOrmRepository,
    validator: Arc<Validator>,
    guard: Arc<LifecycleGuard>,
    cache: Arc<ReferenceCache>,
    operation_timeout: Duration,
}

impl ZoneService {
    pub fn new(
        repo: ZoneSeaOrmRepository,
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

    /// Create a zone; the zone id must be new and the carpark must exist
    pub async fn create(&self, mut request: ZoneCreateRequest) -> AppResult<WriteOutcome<Zone>> {
        // Coerced references are written as the unassigned id, so no zone may own it
        if request.zone_id == UNASSIGNED_ID {
            return Err(AppError::validation(format!(
                "zone_id {UNASSIGNED_ID} is reserved for unassigned references"
            )));
        }
        self.validator
            .require_absent(ReferenceSet::Zone, request.zone_id)?;
        let [carpark_id] = self.validator.resolve(
            EntityKind::Zone,
            [ReferenceCheck::new(
                "carpark_id",
                ReferenceSet::Carpark,
                request.carpark_id,
            )],
        )?;
        request.carpark_id = carpark_id;

        let zone = with_deadline("create zone", self.operation_timeout, self.repo.create(request))
            .await?;
        info!("Created zone {} in carpark {}", zone.zone_id, zone.carpark_id);

        let cache_warning = refresh_after_write(&self.cache, ReferenceSet::Zone).await;
        Ok(WriteOutcome::new(zone, cache_warning))
    }

    /// Update a live zone's attributes
    pub async fn update(
        &self,
        zone_id: i32,
        mut request: ZoneUpdateRequest,
    ) -> AppResult<WriteOutcome<Zone>> {
        self.validator.require_member(ReferenceSet::Zone, zone_id)?;
        let [carpark_id] = self.validator.resolve(
            EntityKind::Zone,
            [ReferenceCheck::new(
                "carpark_id",
                ReferenceSet::Carpark,
                request.carpark_id,
            )],
        )?;
        request.carpark_id = carpark_id;

        let zone = with_deadline(
            "update zone",
            self.operation_timeout,
            self.repo.update(zone_id, request),
        )
        .await?;

        let cache_warning = refresh_after_write(&self.cache, ReferenceSet::Zone).await;
        Ok(WriteOutcome::new(zone, cache_warning))
    }

    pub async fn set_enabled(&self, zone_id: i32, enabled: bool) -> AppResult<Transition> {
        self.guard
            .set_enabled(EntityKind::Zone, &EntityKey::Int(zone_id), enabled)
            .await
    }

    /// Soft-delete a zone; the zone set is refreshed afterwards
    pub async fn delete(&self, zone_id: i32) -> AppResult<DeleteOutcome> {
        self.guard
            .soft_delete(EntityKind::Zone, &EntityKey::Int(zone_id))
            .await
    }

    pub async fn get(&self, zone_id: i32) -> AppResult<Zone> {
        with_deadline(
            "get zone",
            self.operation_timeout,
            self.repo.find_by_zone_id(zone_id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("zone", zone_id))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> AppResult<Vec<Zone>> {
        Ok(with_deadline("list zones", self.operation_timeout, self.repo.list(filter)).await?)
    }

    pub async fn list_by_carpark(&self, carpark_id: i32) -> AppResult<Vec<Zone>> {
        Ok(with_deadline(
            "list zones by carpark",
            self.operation_timeout,
            self.repo.list_by_carpark(carpark_id),
        )
        .await?)
    }
}
