//! Carpark service
//!
//! Carparks back the carpark reference set. They carry no lifecycle state, so
//! deletion removes the row outright.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{WriteOutcome, refresh_after_write};
use crate::database::repositories::CarparkSeaOrmRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{Carpark, CarparkCreateRequest, CarparkUpdateRequest, ReferenceSet};
use crate::services::lifecycle::DeleteOutcome;
use crate::services::reference_cache::ReferenceCache;
use crate::services::validation::Validator;
use crate::store::with_deadline;

pub struct CarparkService {
    repo: CarparkSeaOrmRepository,
    validator: Arc<Validator>,
    cache: Arc<ReferenceCache>,
    operation_timeout: Duration,
}

impl CarparkService {
    pub fn new(
        repo: CarparkSeaOrmRepository,
        validator: Arc<Validator>,
        cache: Arc<ReferenceCache>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            validator,
            cache,
            operation_timeout,
        }
    }

    pub async fn create(&self, request: CarparkCreateRequest) -> AppResult<WriteOutcome<Carpark>> {
        let carpark = with_deadline(
            "create carpark",
            self.operation_timeout,
            self.repo.create(request),
        )
        .await?;
        info!("Created carpark {} ({})", carpark.id, carpark.name);

        let cache_warning = refresh_after_write(&self.cache, ReferenceSet::Carpark).await;
        Ok(WriteOutcome::new(carpark, cache_warning))
    }

    /// Update a carpark that is currently a member of the carpark set
    pub async fn update(
        &self,
        id: i32,
        request: CarparkUpdateRequest,
    ) -> AppResult<WriteOutcome<Carpark>> {
        self.validator.require_member(ReferenceSet::Carpark, id)?;

        let carpark = with_deadline(
            "update carpark",
            self.operation_timeout,
            self.repo.update(id, request),
        )
        .await?;

        let cache_warning = refresh_after_write(&self.cache, ReferenceSet::Carpark).await;
        Ok(WriteOutcome::new(carpark, cache_warning))
    }

    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome> {
        let rows_affected =
            with_deadline("delete carpark", self.operation_timeout, self.repo.delete(id)).await?;
        if rows_affected == 0 {
            return Err(AppError::not_found("carpark", id));
        }
        info!("Deleted carpark {}", id);

        let cache_warning = refresh_after_write(&self.cache, ReferenceSet::Carpark).await;
        Ok(DeleteOutcome {
            rows_affected,
            cache_warning,
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<Carpark> {
        with_deadline("get carpark", self.operation_timeout, self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("carpark", id))
    }

    pub async fn list(&self) -> AppResult<Vec<Carpark>> {
        Ok(with_deadline("list carparks", self.operation_timeout, self.repo.list_all()).await?)
    }
}
