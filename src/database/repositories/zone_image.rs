//! SeaORM zone image repository implementation

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{prelude::ZoneImages, zone_image};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{ZoneImage, ZoneImageCreateRequest, ZoneImageUpdateRequest};

#[derive(Clone)]
pub struct ZoneImageSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl ZoneImageSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn create(&self, request: ZoneImageCreateRequest) -> RepositoryResult<ZoneImage> {
        let active_model = zone_image::ActiveModel {
            id: NotSet,
            zone_id: Set(request.zone_id),
            lang: Set(request.lang),
            image_sm: Set(request.image_sm),
            image_lg: Set(request.image_lg),
            extra: Set(request.extra),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("zone_images", e))?;
        debug!("Inserted image {} for zone {}", model.id, model.zone_id);
        Ok(self.model_to_domain(model))
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<ZoneImage>> {
        let model = ZoneImages::find_by_id(id).one(&*self.connection).await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    pub async fn update(
        &self,
        id: i32,
        request: ZoneImageUpdateRequest,
    ) -> RepositoryResult<ZoneImage> {
        let model = ZoneImages::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("zone_images", "id", id))?;

        let mut active_model: zone_image::ActiveModel = model.into();
        active_model.zone_id = Set(request.zone_id);
        active_model.lang = Set(request.lang);
        active_model.image_sm = Set(request.image_sm);
        active_model.image_lg = Set(request.image_lg);
        active_model.extra = Set(request.extra);

        let updated = active_model.update(&*self.connection).await?;
        debug!("Updated zone image {}", id);
        Ok(self.model_to_domain(updated))
    }

    pub async fn delete(&self, id: i32) -> RepositoryResult<u64> {
        let result = ZoneImages::delete_by_id(id).exec(&*self.connection).await?;
        debug!("Deleted zone image {}: {} row(s)", id, result.rows_affected);
        Ok(result.rows_affected)
    }

    /// Images for one zone, optionally narrowed to a language
    pub async fn list_by_zone(
        &self,
        zone_id: i32,
        lang: Option<&str>,
    ) -> RepositoryResult<Vec<ZoneImage>> {
        let mut select = ZoneImages::find().filter(zone_image::Column::ZoneId.eq(zone_id));
        if let Some(lang) = lang {
            select = select.filter(zone_image::Column::Lang.eq(lang));
        }
        let models = select
            .order_by_asc(zone_image::Column::Lang)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: zone_image::Model) -> ZoneImage {
        ZoneImage {
            id: model.id,
            zone_id: model.zone_id,
            lang: model.lang,
            image_sm: model.image_sm,
            image_lg: model.image_lg,
            extra: model.extra,
        }
    }
}
