//! SeaORM present-car repository implementation

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{prelude::PresentCars, present_car};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{PresentCar, PresentCarCreateRequest, PresentCarUpdateRequest};

#[derive(Clone)]
pub struct PresentCarSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl PresentCarSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Record a sighting. Zone and camera references must already be validated.
    pub async fn create(&self, request: PresentCarCreateRequest) -> RepositoryResult<PresentCar> {
        let active_model = present_car::ActiveModel {
            id: NotSet,
            car_details_id: Set(request.car_details_id),
            camera_id: Set(request.camera_id),
            confidence: Set(request.confidence),
            curr_zone_id: Set(request.curr_zone_id),
            last_zone_id: Set(request.last_zone_id),
            direction: Set(request.direction),
            lpn: Set(request.lpn),
            transaction_date: Set(request.transaction_date.unwrap_or_else(chrono::Utc::now)),
            extra: Set(request.extra),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("presentcar", e))?;
        debug!("Recorded present car {} ({})", model.id, model.lpn);
        Ok(self.model_to_domain(model))
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<PresentCar>> {
        let model = PresentCars::find_by_id(id).one(&*self.connection).await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    pub async fn update(
        &self,
        id: i32,
        request: PresentCarUpdateRequest,
    ) -> RepositoryResult<PresentCar> {
        let model = PresentCars::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("presentcar", "id", id))?;

        let mut active_model: present_car::ActiveModel = model.into();
        active_model.camera_id = Set(request.camera_id);
        active_model.confidence = Set(request.confidence);
        active_model.curr_zone_id = Set(request.curr_zone_id);
        active_model.last_zone_id = Set(request.last_zone_id);
        active_model.direction = Set(request.direction);
        active_model.lpn = Set(request.lpn);
        active_model.extra = Set(request.extra);

        let updated = active_model.update(&*self.connection).await?;
        debug!("Updated present car {}", id);
        Ok(self.model_to_domain(updated))
    }

    /// Rewrite every sighting of one plate; returns the number of rows changed
    pub async fn update_by_lpn(
        &self,
        lpn: &str,
        request: PresentCarUpdateRequest,
    ) -> RepositoryResult<u64> {
        let changes = present_car::ActiveModel {
            camera_id: Set(request.camera_id),
            confidence: Set(request.confidence),
            curr_zone_id: Set(request.curr_zone_id),
            last_zone_id: Set(request.last_zone_id),
            direction: Set(request.direction),
            lpn: Set(request.lpn),
            extra: Set(request.extra),
            ..Default::default()
        };

        let result = PresentCars::update_many()
            .set(changes)
            .filter(present_car::Column::Lpn.eq(lpn))
            .exec(&*self.connection)
            .await?;
        debug!("Updated sightings of {}: {} row(s)", lpn, result.rows_affected);
        Ok(result.rows_affected)
    }

    /// Remove a sighting once the vehicle has left
    pub async fn delete(&self, id: i32) -> RepositoryResult<u64> {
        let result = PresentCars::delete_by_id(id)
            .exec(&*self.connection)
            .await?;
        debug!("Deleted present car {}: {} row(s)", id, result.rows_affected);
        Ok(result.rows_affected)
    }

    /// Sightings, newest first, optionally restricted to one current zone
    pub async fn list(&self, curr_zone_id: Option<i32>) -> RepositoryResult<Vec<PresentCar>> {
        let mut select = PresentCars::find();
        if let Some(zone_id) = curr_zone_id {
            select = select.filter(present_car::Column::CurrZoneId.eq(zone_id));
        }
        let models = select
            .order_by_desc(present_car::Column::TransactionDate)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    pub async fn find_by_lpn(&self, lpn: &str) -> RepositoryResult<Vec<PresentCar>> {
        let models = PresentCars::find()
            .filter(present_car::Column::Lpn.eq(lpn))
            .order_by_desc(present_car::Column::TransactionDate)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: present_car::Model) -> PresentCar {
        PresentCar {
            id: model.id,
            car_details_id: model.car_details_id,
            camera_id: model.camera_id,
            confidence: model.confidence,
            curr_zone_id: model.curr_zone_id,
            last_zone_id: model.last_zone_id,
            direction: model.direction,
            lpn: model.lpn,
            transaction_date: model.transaction_date,
            extra: model.extra,
        }
    }
}
