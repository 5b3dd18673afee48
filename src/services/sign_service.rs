//! Sign service

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::WriteOutcome;
use crate::database::repositories::{LifecycleFilter, SignSeaOrmRepository};
use crate::errors::{AppError, AppResult};
use crate::models::{
    EntityKey, EntityKind, ReferenceSet, Sign, SignCreateRequest, SignUpdateRequest,
};
use crate::services::lifecycle::{DeleteOutcome, LifecycleGuard, Transition};
use crate::services::validation::{ReferenceCheck, Validator};
use crate::store::with_deadline;

pub struct SignService {
    repo: SignSeaOrmRepository,
    validator: Arc<Validator>,
    guard: Arc<LifecycleGuard>,
    operation_timeout: Duration,
}

impl SignService {
    pub fn new(
        repo: SignSeaOrmRepository,
        validator: Arc<Validator>,
        guard: Arc<LifecycleGuard>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            validator,
            guard,
            operation_timeout,
        }
    }

    pub async fn create(&self, mut request: SignCreateRequest) -> AppResult<WriteOutcome<Sign>> {
        let [zone_id] = self.validator.resolve(
            EntityKind::Sign,
            [ReferenceCheck::new("zone_id", ReferenceSet::Zone, request.zone_id)],
        )?;
        request.zone_id = zone_id;

        let sign = with_deadline("create sign", self.operation_timeout, self.repo.create(request))
            .await?;
        info!("Created sign {} for zone {}", sign.sign_id, sign.zone_id);
        Ok(WriteOutcome::new(sign, None))
    }

    pub async fn update(
        &self,
        sign_id: i32,
        mut request: SignUpdateRequest,
    ) -> AppResult<WriteOutcome<Sign>> {
        let [zone_id] = self.validator.resolve(
            EntityKind::Sign,
            [ReferenceCheck::new("zone_id", ReferenceSet::Zone, request.zone_id)],
        )?;
        request.zone_id = zone_id;

        let sign = with_deadline(
            "update sign",
            self.operation_timeout,
            self.repo.update(sign_id, request),
        )
        .await?;
        Ok(WriteOutcome::new(sign, None))
    }

    pub async fn set_enabled(&self, sign_id: i32, enabled: bool) -> AppResult<Transition> {
        self.guard
            .set_enabled(EntityKind::Sign, &EntityKey::Int(sign_id), enabled)
            .await
    }

    pub async fn delete(&self, sign_id: i32) -> AppResult<DeleteOutcome> {
        self.guard
            .soft_delete(EntityKind::Sign, &EntityKey::Int(sign_id))
            .await
    }

    pub async fn get(&self, sign_id: i32) -> AppResult<Sign> {
        with_deadline(
            "get sign",
            self.operation_timeout,
            self.repo.find_by_sign_id(sign_id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("sign", sign_id))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> AppResult<Vec<Sign>> {
        Ok(with_deadline("list signs", self.operation_timeout, self.repo.list(filter)).await?)
    }
}
