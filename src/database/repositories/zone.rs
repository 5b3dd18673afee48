//! SeaORM Zone repository implementation

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::{LifecycleEntity, LifecycleFilter};
use crate::entities::{prelude::Zones, zone};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{LifecycleState, Zone, ZoneCreateRequest, ZoneUpdateRequest};

/// SeaORM-based repository for zones
#[derive(Clone)]
pub struct ZoneSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl ZoneSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Insert a zone in the created state
    pub async fn create(&self, request: ZoneCreateRequest) -> RepositoryResult<Zone> {
        let state = LifecycleState::CREATED;
        let active_model = zone::ActiveModel {
            id: NotSet,
            zone_id: Set(request.zone_id),
            carpark_id: Set(request.carpark_id),
            name: Set(request.name),
            max_capacity: Set(request.max_capacity),
            free_capacity: Set(request.free_capacity),
            last_update: Set(Some(chrono::Utc::now())),
            is_enabled: Set(state.is_enabled),
            is_deleted: Set(state.is_deleted),
            extra: Set(request.extra),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("zone", e))?;
        debug!("Inserted zone {} (row {})", model.zone_id, model.id);
        Ok(self.model_to_domain(model))
    }

    /// Find a zone by its natural key, whatever its lifecycle state
    pub async fn find_by_zone_id(&self, zone_id: i32) -> RepositoryResult<Option<Zone>> {
        let model = Zones::find()
            .filter(zone::Column::ZoneId.eq(zone_id))
            .one(&*self.connection)
            .await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    /// Update the attributes of a live zone; lifecycle columns are never written here
    pub async fn update(&self, zone_id: i32, request: ZoneUpdateRequest) -> RepositoryResult<Zone> {
        let changes = zone::ActiveModel {
            carpark_id: Set(request.carpark_id),
            name: Set(request.name),
            max_capacity: Set(request.max_capacity),
            free_capacity: Set(request.free_capacity),
            last_update: Set(Some(chrono::Utc::now())),
            extra: Set(request.extra),
            ..Default::default()
        };

        let result = Zones::update_many()
            .set(changes)
            .filter(zone::Entity::key_column().eq(zone_id))
            .filter(zone::Entity::deleted_column().eq(false))
            .exec(&*self.connection)
            .await?;
        debug!("Updated zone {}: {} row(s)", zone_id, result.rows_affected);

        if result.rows_affected == 0 {
            return Err(RepositoryError::record_not_found("zone", "zone_id", zone_id));
        }

        self.find_by_zone_id(zone_id)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("zone", "zone_id", zone_id))
    }

    /// List zones matching a lifecycle filter, ordered by zone id
    pub async fn list(&self, filter: LifecycleFilter) -> RepositoryResult<Vec<Zone>> {
        let models = filter
            .apply(Zones::find())
            .order_by_asc(zone::Column::ZoneId)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    /// Live zones belonging to one carpark
    pub async fn list_by_carpark(&self, carpark_id: i32) -> RepositoryResult<Vec<Zone>> {
        let models = LifecycleFilter::Active
            .apply(Zones::find())
            .filter(zone::Column::CarparkId.eq(carpark_id))
            .order_by_asc(zone::Column::ZoneId)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: zone::Model) -> Zone {
        Zone {
            id: model.id,
            zone_id: model.zone_id,
            carpark_id: model.carpark_id,
            name: model.name,
            max_capacity: model.max_capacity,
            free_capacity: model.free_capacity,
            last_update: model.last_update,
            is_enabled: model.is_enabled,
            is_deleted: model.is_deleted,
            extra: model.extra,
        }
    }
}
