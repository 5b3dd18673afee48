//! SeaORM Sign repository implementation

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::{LifecycleEntity, LifecycleFilter};
use crate::entities::{prelude::Signs, sign};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{LifecycleState, Sign, SignCreateRequest, SignUpdateRequest};

#[derive(Clone)]
pub struct SignSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl SignSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn create(&self, request: SignCreateRequest) -> RepositoryResult<Sign> {
        let state = LifecycleState::CREATED;
        let active_model = sign::ActiveModel {
            id: NotSet,
            sign_id: Set(request.sign_id),
            sign_name: Set(request.sign_name),
            sign_type: Set(request.sign_type),
            sign_ip: Set(request.sign_ip),
            sign_port: Set(request.sign_port),
            zone_id: Set(request.zone_id),
            is_enabled: Set(state.is_enabled),
            is_deleted: Set(state.is_deleted),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("sign", e))?;
        debug!("Inserted sign {}", model.sign_id);
        Ok(self.model_to_domain(model))
    }

    pub async fn find_by_sign_id(&self, sign_id: i32) -> RepositoryResult<Option<Sign>> {
        let model = Signs::find()
            .filter(sign::Column::SignId.eq(sign_id))
            .one(&*self.connection)
            .await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    pub async fn update(&self, sign_id: i32, request: SignUpdateRequest) -> RepositoryResult<Sign> {
        let changes = sign::ActiveModel {
            sign_name: Set(request.sign_name),
            sign_type: Set(request.sign_type),
            sign_ip: Set(request.sign_ip),
            sign_port: Set(request.sign_port),
            zone_id: Set(request.zone_id),
            ..Default::default()
        };

        let result = Signs::update_many()
            .set(changes)
            .filter(sign::Entity::key_column().eq(sign_id))
            .filter(sign::Entity::deleted_column().eq(false))
            .exec(&*self.connection)
            .await?;
        debug!("Updated sign {}: {} row(s)", sign_id, result.rows_affected);

        if result.rows_affected == 0 {
            return Err(RepositoryError::record_not_found("sign", "sign_id", sign_id));
        }

        self.find_by_sign_id(sign_id)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("sign", "sign_id", sign_id))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> RepositoryResult<Vec<Sign>> {
        let models = filter
            .apply(Signs::find())
            .order_by_asc(sign::Column::SignId)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: sign::Model) -> Sign {
        Sign {
            id: model.id,
            sign_id: model.sign_id,
            sign_name: model.sign_name,
            sign_type: model.sign_type,
            sign_ip: model.sign_ip,
            sign_port: model.sign_port,
            zone_id: model.zone_id,
            is_enabled: model.is_enabled,
            is_deleted: model.is_deleted,
        }
    }
}
