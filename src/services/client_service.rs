//! API client credentials

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::database::repositories::{ClientSeaOrmRepository, LifecycleFilter};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ClientCredential, ClientCredentialCreateRequest, ClientCredentialUpdateRequest, EntityKey,
    EntityKind,
};
use crate::services::lifecycle::{DeleteOutcome, LifecycleGuard, Transition};
use crate::store::with_deadline;

pub struct ClientService {
    repo: ClientSeaOrmRepository,
    guard: Arc<LifecycleGuard>,
    operation_timeout: Duration,
}

impl ClientService {
    pub fn new(
        repo: ClientSeaOrmRepository,
        guard: Arc<LifecycleGuard>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            guard,
            operation_timeout,
        }
    }

    pub async fn create(
        &self,
        request: ClientCredentialCreateRequest,
    ) -> AppResult<ClientCredential> {
        let client = with_deadline(
            "create client",
            self.operation_timeout,
            self.repo.create(request),
        )
        .await?;
        info!("Created client {}", client.client_id);
        Ok(client)
    }

    pub async fn update(
        &self,
        client_id: &str,
        request: ClientCredentialUpdateRequest,
    ) -> AppResult<ClientCredential> {
        let client = with_deadline(
            "update client",
            self.operation_timeout,
            self.repo.update(client_id, request),
        )
        .await?;
        info!("Updated client {}", client.client_id);
        Ok(client)
    }

    pub async fn set_enabled(&self, client_id: &str, enabled: bool) -> AppResult<Transition> {
        self.guard
            .set_enabled(EntityKind::Client, &EntityKey::from(client_id), enabled)
            .await
    }

    pub async fn delete(&self, client_id: &str) -> AppResult<DeleteOutcome> {
        self.guard
            .soft_delete(EntityKind::Client, &EntityKey::from(client_id))
            .await
    }

    pub async fn get(&self, client_id: &str) -> AppResult<ClientCredential> {
        with_deadline(
            "get client",
            self.operation_timeout,
            self.repo.find_by_client_id(client_id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("client", client_id))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> AppResult<Vec<ClientCredential>> {
        Ok(with_deadline("list clients", self.operation_timeout, self.repo.list(filter)).await?)
    }
}
