//! SeaORM Camera repository implementation

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::{LifecycleEntity, LifecycleFilter};
use crate::entities::{camera, prelude::Cameras};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Camera, CameraCreateRequest, CameraUpdateRequest, LifecycleState};

/// SeaORM-based repository for cameras
#[derive(Clone)]
pub struct CameraSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl CameraSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Insert a camera in the created state. Zone references must already be validated.
    pub async fn create(&self, request: CameraCreateRequest) -> RepositoryResult<Camera> {
        let state = LifecycleState::CREATED;
        let active_model = camera::ActiveModel {
            id: NotSet,
            cam_name: Set(request.cam_name),
            cam_type: Set(request.cam_type),
            cam_ip: Set(request.cam_ip),
            cam_port: Set(request.cam_port),
            cam_user: Set(request.cam_user),
            cam_password: Set(request.cam_password),
            zone_id_in: Set(request.zone_id_in),
            zone_id_out: Set(request.zone_id_out),
            direction: Set(request.direction),
            is_enabled: Set(state.is_enabled),
            is_deleted: Set(state.is_deleted),
            extra: Set(request.extra),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("camera", e))?;
        debug!("Inserted camera {}", model.id);
        Ok(self.model_to_domain(model))
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Camera>> {
        let model = Cameras::find_by_id(id).one(&*self.connection).await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    /// Update a live camera's attributes
    pub async fn update(&self, id: i32, request: CameraUpdateRequest) -> RepositoryResult<Camera> {
        let changes = camera::ActiveModel {
            cam_name: Set(request.cam_name),
            cam_type: Set(request.cam_type),
            cam_ip: Set(request.cam_ip),
            cam_port: Set(request.cam_port),
            cam_user: Set(request.cam_user),
            cam_password: Set(request.cam_password),
            zone_id_in: Set(request.zone_id_in),
            zone_id_out: Set(request.zone_id_out),
            direction: Set(request.direction),
            extra: Set(request.extra),
            ..Default::default()
        };

        let result = Cameras::update_many()
            .set(changes)
            .filter(camera::Entity::key_column().eq(id))
            .filter(camera::Entity::deleted_column().eq(false))
            .exec(&*self.connection)
            .await?;
        debug!("Updated camera {}: {} row(s)", id, result.rows_affected);

        if result.rows_affected == 0 {
            return Err(RepositoryError::record_not_found("camera", "id", id));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("camera", "id", id))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> RepositoryResult<Vec<Camera>> {
        let models = filter
            .apply(Cameras::find())
            .order_by_asc(camera::Column::Id)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: camera::Model) -> Camera {
        Camera {
            id: model.id,
            cam_name: model.cam_name,
            cam_type: model.cam_type,
            cam_ip: model.cam_ip,
            cam_port: model.cam_port,
            cam_user: model.cam_user,
            cam_password: model.cam_password,
            zone_id_in: model.zone_id_in,
            zone_id_out: model.zone_id_out,
            direction: model.direction,
            is_enabled: model.is_enabled,
            is_deleted: model.is_deleted,
            extra: model.extra,
        }
    }
}
