//! SeaORM implementation of [`EntityStore`]

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Value};
use std::sync::Arc;
use tracing::debug;

use super::EntityStore;
use crate::database::repositories::LifecycleEntity;
use crate::entities::{api_key, camera, carpark, sign, user, zone};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{EntityKey, EntityKind, LifecycleState};

/// [`EntityStore`] over a SeaORM connection
#[derive(Clone)]
pub struct SeaOrmEntityStore {
    connection: Arc<DatabaseConnection>,
}

impl SeaOrmEntityStore {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Clients and users are keyed by text, everything else by integer
    fn key_matches(kind: EntityKind, key: &EntityKey) -> bool {
        match key {
            EntityKey::Text(_) => matches!(kind, EntityKind::Client | EntityKind::User),
            EntityKey::Int(_) => !matches!(kind, EntityKind::Client | EntityKind::User),
        }
    }

    fn unsupported(operation: &str, kind: EntityKind) -> RepositoryError {
        RepositoryError::Unsupported {
            operation: operation.to_string(),
            table: kind.table_name().to_string(),
        }
    }

    async fn lifecycle_of<E: LifecycleEntity>(
        &self,
        key: Value,
    ) -> RepositoryResult<Option<LifecycleState>> {
        let row: Option<(bool, bool)> = E::find()
            .select_only()
            .column(E::enabled_column())
            .column(E::deleted_column())
            .filter(E::key_column().eq(key))
            .into_tuple()
            .one(&*self.connection)
            .await?;
        Ok(row.map(|(is_enabled, is_deleted)| LifecycleState::new(is_enabled, is_deleted)))
    }

    async fn compare_and_set_enabled<E: LifecycleEntity>(
        &self,
        key: Value,
        observed: bool,
        desired: bool,
    ) -> RepositoryResult<u64> {
        let result = E::update_many()
            .col_expr(E::enabled_column(), Expr::value(desired))
            .filter(E::key_column().eq(key))
            .filter(E::deleted_column().eq(false))
            .filter(E::enabled_column().eq(observed))
            .exec(&*self.connection)
            .await?;
        Ok(result.rows_affected)
    }

    async fn mark_deleted<E: LifecycleEntity>(&self, key: Value) -> RepositoryResult<u64> {
        let result = E::update_many()
            .col_expr(E::deleted_column(), Expr::value(true))
            .filter(E::key_column().eq(key))
            .filter(E::deleted_column().eq(false))
            .exec(&*self.connection)
            .await?;
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl EntityStore for SeaOrmEntityStore {
    async fn list_active_ids(&self, kind: EntityKind) -> RepositoryResult<Vec<i32>> {
        let ids: Vec<i32> = match kind {
            EntityKind::Zone => {
                zone::Entity::find()
                    .select_only()
                    .column(zone::Column::ZoneId)
                    .filter(zone::Column::IsDeleted.eq(false))
                    .into_tuple()
                    .all(&*self.connection)
                    .await?
            }
            EntityKind::Camera => {
                camera::Entity::find()
                    .select_only()
                    .column(camera::Column::Id)
                    .filter(camera::Column::IsDeleted.eq(false))
                    .into_tuple()
                    .all(&*self.connection)
                    .await?
            }
            EntityKind::Carpark => {
                carpark::Entity::find()
                    .select_only()
                    .column(carpark::Column::Id)
                    .into_tuple()
                    .all(&*self.connection)
                    .await?
            }
            other => return Err(Self::unsupported("list_active_ids", other)),
        };

        debug!("Loaded {} active {} id(s)", ids.len(), kind);
        Ok(ids)
    }

    async fn get_lifecycle(
        &self,
        kind: EntityKind,
        key: &EntityKey,
    ) -> RepositoryResult<Option<LifecycleState>> {
        if !Self::key_matches(kind, key) {
            return Ok(None);
        }
        let value = Value::from(key);
        match kind {
            EntityKind::Zone => self.lifecycle_of::<zone::Entity>(value).await,
            EntityKind::Camera => self.lifecycle_of::<camera::Entity>(value).await,
            EntityKind::Sign => self.lifecycle_of::<sign::Entity>(value).await,
            EntityKind::Client => self.lifecycle_of::<api_key::Entity>(value).await,
            EntityKind::User => self.lifecycle_of::<user::Entity>(value).await,
            other => Err(Self::unsupported("get_lifecycle", other)),
        }
    }

    async fn set_enabled_if(
        &self,
        kind: EntityKind,
        key: &EntityKey,
        observed: bool,
        desired: bool,
    ) -> RepositoryResult<u64> {
        if !Self::key_matches(kind, key) {
            return Ok(0);
        }
        let value = Value::from(key);
        let rows = match kind {
            EntityKind::Zone => {
                self.compare_and_set_enabled::<zone::Entity>(value, observed, desired)
                    .await?
            }
            EntityKind::Camera => {
                self.compare_and_set_enabled::<camera::Entity>(value, observed, desired)
                    .await?
            }
            EntityKind::Sign => {
                self.compare_and_set_enabled::<sign::Entity>(value, observed, desired)
                    .await?
            }
            EntityKind::Client => {
                self.compare_and_set_enabled::<api_key::Entity>(value, observed, desired)
                    .await?
            }
            EntityKind::User => {
                self.compare_and_set_enabled::<user::Entity>(value, observed, desired)
                    .await?
            }
            other => return Err(Self::unsupported("set_enabled", other)),
        };

        debug!(
            "Set {} {} is_enabled {} -> {}: {} row(s)",
            kind, key, observed, desired, rows
        );
        Ok(rows)
    }

    async fn soft_delete(&self, kind: EntityKind, key: &EntityKey) -> RepositoryResult<u64> {
        if !Self::key_matches(kind, key) {
            return Ok(0);
        }
        let value = Value::from(key);
        let rows = match kind {
            EntityKind::Zone => self.mark_deleted::<zone::Entity>(value).await?,
            EntityKind::Camera => self.mark_deleted::<camera::Entity>(value).await?,
            EntityKind::Sign => self.mark_deleted::<sign::Entity>(value).await?,
            EntityKind::Client => self.mark_deleted::<api_key::Entity>(value).await?,
            EntityKind::User => self.mark_deleted::<user::Entity>(value).await?,
            other => return Err(Self::unsupported("soft_delete", other)),
        };

        debug!("Soft-deleted {} {}: {} row(s)", kind, key, rows);
        Ok(rows)
    }
}
