use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "presentcar")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub car_details_id: i32,
    pub camera_id: i32,
    pub confidence: i32,
    pub curr_zone_id: i32,
    pub last_zone_id: i32,
    pub direction: String,
    pub lpn: String,
    pub transaction_date: DateTimeUtc,
    pub extra: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
