use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "zone")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub zone_id: i32,
    pub carpark_id: i32,
    pub name: String,
    pub max_capacity: i32,
    pub free_capacity: i32,
    pub last_update: Option<DateTimeUtc>,
    pub is_enabled: bool,
    pub is_deleted: bool,
    pub extra: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
