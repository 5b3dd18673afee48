//! Zone images

use std::sync::Arc;
use std::time::Duration;

use super::WriteOutcome;
use crate::database::repositories::ZoneImageSeaOrmRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{
    EntityKind, ReferenceSet, ZoneImage, ZoneImageCreateRequest, ZoneImageUpdateRequest,
};
use crate::services::lifecycle::DeleteOutcome;
use crate::services::validation::{ReferenceCheck, Validator};
use crate::store::with_deadline;

pub struct ZoneImageService {
    repo: ZoneImageSeaOrmRepository,
    validator: Arc<Validator>,
    operation_timeout: Duration,
}

impl ZoneImageService {
    pub fn new(
        repo: ZoneImageSeaOrmRepository,
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
        mut request: ZoneImageCreateRequest,
    ) -> AppResult<WriteOutcome<ZoneImage>> {
        let [zone_id] = self.validator.resolve(
            EntityKind::ZoneImage,
            [ReferenceCheck::new("zone_id", ReferenceSet::Zone, request.zone_id)],
        )?;
        request.zone_id = zone_id;

        let image = with_deadline(
            "create zone image",
            self.operation_timeout,
            self.repo.create(request),
        )
        .await?;
        Ok(WriteOutcome::new(image, None))
    }

    pub async fn update(
        &self,
        id: i32,
        mut request: ZoneImageUpdateRequest,
    ) -> AppResult<WriteOutcome<ZoneImage>> {
        let [zone_id] = self.validator.resolve(
            EntityKind::ZoneImage,
            [ReferenceCheck::new("zone_id", ReferenceSet::Zone, request.zone_id)],
        )?;
        request.zone_id = zone_id;

        let image = with_deadline(
            "update zone image",
            self.operation_timeout,
            self.repo.update(id, request),
        )
        .await?;
        Ok(WriteOutcome::new(image, None))
    }

    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome> {
        let rows_affected = with_deadline(
            "delete zone image",
            self.operation_timeout,
            self.repo.delete(id),
        )
        .await?;
        if rows_affected == 0 {
            return Err(AppError::not_found("zone image", id));
        }
        Ok(DeleteOutcome {
            rows_affected,
            cache_warning: None,
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<ZoneImage> {
        with_deadline(
            "get zone image",
            self.operation_timeout,
            self.repo.find_by_id(id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("zone image", id))
    }

    pub async fn list_by_zone(
        &self,
        zone_id: i32,
        lang: Option<&str>,
    ) -> AppResult<Vec<ZoneImage>> {
        Ok(with_deadline(
            "list zone images",
            self.operation_timeout,
            self.repo.list_by_zone(zone_id, lang),
        )
        .await?)
    }
}
