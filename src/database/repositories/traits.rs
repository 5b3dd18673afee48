//! Common traits for SeaORM repository implementations
//!
//! Tables that carry the `(is_enabled, is_deleted)` pair describe their
//! lifecycle columns once here; listing filters and the entity store's
//! conditional writes are written against this description.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};
use serde::Deserialize;

use crate::entities::{api_key, camera, sign, user, zone};

/// A table with a natural key and lifecycle columns
pub trait LifecycleEntity: EntityTrait {
    /// Column the request layer addresses rows by
    fn key_column() -> Self::Column;
    fn enabled_column() -> Self::Column;
    fn deleted_column() -> Self::Column;
}

impl LifecycleEntity for zone::Entity {
    fn key_column() -> Self::Column {
        zone::Column::ZoneId
    }
    fn enabled_column() -> Self::Column {
        zone::Column::IsEnabled
    }
    fn deleted_column() -> Self::Column {
        zone::Column::IsDeleted
    }
}

impl LifecycleEntity for camera::Entity {
    fn key_column() -> Self::Column {
        camera::Column::Id
    }
    fn enabled_column() -> Self::Column {
        camera::Column::IsEnabled
    }
    fn deleted_column() -> Self::Column {
        camera::Column::IsDeleted
    }
}

impl LifecycleEntity for sign::Entity {
    fn key_column() -> Self::Column {
        sign::Column::SignId
    }
    fn enabled_column() -> Self::Column {
        sign::Column::IsEnabled
    }
    fn deleted_column() -> Self::Column {
        sign::Column::IsDeleted
    }
}

impl LifecycleEntity for api_key::Entity {
    fn key_column() -> Self::Column {
        api_key::Column::ClientId
    }
    fn enabled_column() -> Self::Column {
        api_key::Column::IsEnabled
    }
    fn deleted_column() -> Self::Column {
        api_key::Column::IsDeleted
    }
}

impl LifecycleEntity for user::Entity {
    fn key_column() -> Self::Column {
        user::Column::Username
    }
    fn enabled_column() -> Self::Column {
        user::Column::IsEnabled
    }
    fn deleted_column() -> Self::Column {
        user::Column::IsDeleted
    }
}

/// Which rows a listing query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleFilter {
    /// Every row that is not soft-deleted
    #[default]
    Active,
    /// Enabled rows that are not soft-deleted
    Enabled,
    /// Soft-deleted rows only
    Deleted,
}

impl LifecycleFilter {
    pub fn apply<E: LifecycleEntity>(self, select: Select<E>) -> Select<E> {
        match self {
            LifecycleFilter::Active => select.filter(E::deleted_column().eq(false)),
            LifecycleFilter::Enabled => select
                .filter(E::deleted_column().eq(false))
                .filter(E::enabled_column().eq(true)),
            LifecycleFilter::Deleted => select.filter(E::deleted_column().eq(true)),
        }
    }
}
