//! SeaORM Carpark repository implementation
//!
//! Carparks have no lifecycle columns; deletion removes the row.

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{carpark, prelude::Carparks};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Carpark, CarparkCreateRequest, CarparkUpdateRequest};

/// SeaORM-based repository for carparks
#[derive(Clone)]
pub struct CarparkSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl CarparkSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn create(&self, request: CarparkCreateRequest) -> RepositoryResult<Carpark> {
        let active_model = carpark::ActiveModel {
            id: NotSet,
            carpark_type: Set(request.carpark_type),
            name: Set(request.name),
            capacity: Set(request.capacity),
            language: Set(request.language),
            extra: Set(request.extra),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("carpark", e))?;
        debug!("Inserted carpark {}", model.id);
        Ok(self.model_to_domain(model))
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Carpark>> {
        let model = Carparks::find_by_id(id).one(&*self.connection).await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    pub async fn update(
        &self,
        id: i32,
        request: CarparkUpdateRequest,
    ) -> RepositoryResult<Carpark> {
        let model = Carparks::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("carpark", "id", id))?;

        let mut active_model: carpark::ActiveModel = model.into();
        active_model.carpark_type = Set(request.carpark_type);
        active_model.name = Set(request.name);
        active_model.capacity = Set(request.capacity);
        active_model.language = Set(request.language);
        active_model.extra = Set(request.extra);

        let updated = active_model.update(&*self.connection).await?;
        debug!("Updated carpark {}", id);
        Ok(self.model_to_domain(updated))
    }

    /// Remove the row; returns the number of rows deleted
    pub async fn delete(&self, id: i32) -> RepositoryResult<u64> {
        let result = Carparks::delete_by_id(id).exec(&*self.connection).await?;
        debug!("Deleted carpark {}: {} row(s)", id, result.rows_affected);
        Ok(result.rows_affected)
    }

    pub async fn list_all(&self) -> RepositoryResult<Vec<Carpark>> {
        let models = Carparks::find()
            .order_by_asc(carpark::Column::Id)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: carpark::Model) -> Carpark {
        Carpark {
            id: model.id,
            carpark_type: model.carpark_type,
            name: model.name,
            capacity: model.capacity,
            language: model.language,
            extra: model.extra,
        }
    }
}
