//! SeaORM client credential repository implementation

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::{LifecycleEntity, LifecycleFilter};
use crate::entities::{api_key, prelude::ApiKeys};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{
    ClientCredential, ClientCredentialCreateRequest, ClientCredentialUpdateRequest, LifecycleState,
};

#[derive(Clone)]
pub struct ClientSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl ClientSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn create(
        &self,
        request: ClientCredentialCreateRequest,
    ) -> RepositoryResult<ClientCredential> {
        let state = LifecycleState::CREATED;
        let active_model = api_key::ActiveModel {
            id: NotSet,
            client_name: Set(request.client_name),
            client_id: Set(request.client_id),
            client_secret: Set(request.client_secret),
            api_key: Set(request.api_key),
            fuzzy_logic: Set(request.fuzzy_logic),
            is_enabled: Set(state.is_enabled),
            is_deleted: Set(state.is_deleted),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_insert("api_key", e))?;
        debug!("Inserted client {}", model.client_id);
        Ok(self.model_to_domain(model))
    }

    pub async fn find_by_client_id(
        &self,
        client_id: &str,
    ) -> RepositoryResult<Option<ClientCredential>> {
        let model = ApiKeys::find()
            .filter(api_key::Column::ClientId.eq(client_id))
            .one(&*self.connection)
            .await?;
        Ok(model.map(|m| self.model_to_domain(m)))
    }

    pub async fn update(
        &self,
        client_id: &str,
        request: ClientCredentialUpdateRequest,
    ) -> RepositoryResult<ClientCredential> {
        let changes = api_key::ActiveModel {
            client_name: Set(request.client_name),
            client_secret: request.client_secret.map_or(NotSet, Set),
            api_key: Set(request.api_key),
            fuzzy_logic: Set(request.fuzzy_logic),
            ..Default::default()
        };

        let result = ApiKeys::update_many()
            .set(changes)
            .filter(api_key::Entity::key_column().eq(client_id))
            .filter(api_key::Entity::deleted_column().eq(false))
            .exec(&*self.connection)
            .await?;
        debug!("Updated client {}: {} row(s)", client_id, result.rows_affected);

        if result.rows_affected == 0 {
            return Err(RepositoryError::record_not_found("api_key", "client_id", client_id));
        }

        self.find_by_client_id(client_id)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("api_key", "client_id", client_id))
    }

    pub async fn list(&self, filter: LifecycleFilter) -> RepositoryResult<Vec<ClientCredential>> {
        let models = filter
            .apply(ApiKeys::find())
            .order_by_asc(api_key::Column::ClientId)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(|m| self.model_to_domain(m)).collect())
    }

    fn model_to_domain(&self, model: api_key::Model) -> ClientCredential {
        ClientCredential {
            id: model.id,
            client_name: model.client_name,
            client_id: model.client_id,
            client_secret: model.client_secret,
            api_key: model.api_key,
            fuzzy_logic: model.fuzzy_logic,
            is_enabled: model.is_enabled,
            is_deleted: model.is_deleted,
        }
    }
}
