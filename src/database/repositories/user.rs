//! SeaORM User repository implementation

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::{LifecycleEntity, LifecycleFilter};
use crate::entities::{prelude::Users, user};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{LifecycleState, User, UserCreateRequest, UserUpdateRequest};

#[derive(Clone)]
pub struct UserSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl UserSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn create(&self, request: UserCreateRequest) -> RepositoryResult<User> {
        let state = LifecycleState::CREATED;
        let active_model = user::ActiveModel {
            id: NotSet,
            username: Set(request.username),
            password: Set(request.password),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            role: Set(request.role),
            is_enabled: Set(state.is_enabled),
            is_deleted: Set(state.is_deleted),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("user", e))?;
        debug!("Inserted user {}", model.username);
        Ok(self.model_to_domain(model))
    }

    pub async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let model = Users::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.connection)
            .await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    /// Rewrite the profile of a live user; lifecycle columns are left alone
    pub async fn update(
        &self,
        username: &str,
        request: UserUpdateRequest,
    ) -> RepositoryResult<User> {
        let changes = user::ActiveModel {
            password: request.password.map_or(NotSet, Set),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            role: Set(request.role),
            ..Default::default()
        };

        let result = Users::update_many()
            .set(changes)
            .filter(user::Entity::key_column().eq(username))
            .filter(user::Entity::deleted_column().eq(false))
            .exec(&*self.connection)
            .await?;
        debug!("Updated user {}: {} row(s)", username, result.rows_affected);

        if result.rows_affected == 0 {
            return Err(RepositoryError::record_not_found("user", "username", username));
        }

        self.find_by_username(username)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("user", "username", username))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> RepositoryResult<Vec<User>> {
        let models = filter
            .apply(Users::find())
            .order_by_asc(user::Column::Username)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: user::Model) -> User {
        User {
            id: model.id,
            username: model.username,
            password: model.password,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
            is_enabled: model.is_enabled,
            is_deleted: model.is_deleted,
        }
    }
}
