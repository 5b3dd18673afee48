//! Users

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::database::repositories::{LifecycleFilter, UserSeaOrmRepository};
use crate::errors::{AppError, AppResult};
use crate::models::{EntityKey, EntityKind, User, UserCreateRequest, UserUpdateRequest};
use crate::services::lifecycle::{DeleteOutcome, LifecycleGuard, Transition};
use crate::store::with_deadline;

pub struct UserService {
    repo: UserSeaOrmRepository,
    guard: Arc<LifecycleGuard>,
    operation_timeout: Duration,
}

impl UserService {
    pub fn new(
        repo: UserSeaOrmRepository,
        guard: Arc<LifecycleGuard>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            guard,
            operation_timeout,
        }
    }

    pub async fn create(&self, request: UserCreateRequest) -> AppResult<User> {
        if request.username.trim().is_empty() {
            return Err(AppError::validation("username must not be empty"));
        }
        let user = with_deadline("create user", self.operation_timeout, self.repo.create(request))
            .await?;
        info!("Created user {}", user.username);
        Ok(user)
    }

    /// Update a live user's profile; deleted users are reported as not found
    pub async fn update(&self, username: &str, request: UserUpdateRequest) -> AppResult<User> {
        let user = with_deadline(
            "update user",
            self.operation_timeout,
            self.repo.update(username, request),
        )
        .await?;
        info!("Updated user {}", user.username);
        Ok(user)
    }

    pub async fn set_enabled(&self, username: &str, enabled: bool) -> AppResult<Transition> {
        self.guard
            .set_enabled(EntityKind::User, &EntityKey::from(username), enabled)
            .await
    }

    pub async fn delete(&self, username: &str) -> AppResult<DeleteOutcome> {
        self.guard
            .soft_delete(EntityKind::User, &EntityKey::from(username))
            .await
    }

    pub async fn get(&self, username: &str) -> AppResult<User> {
        with_deadline(
            "get user",
            self.operation_timeout,
            self.repo.find_by_username(username),
        )
        .await?
        .ok_or_else(|| AppError::not_found("user", username))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> AppResult<Vec<User>> {
        Ok(with_deadline("list users", self.operation_timeout, self.repo.list(filter)).await?)
    }
}
