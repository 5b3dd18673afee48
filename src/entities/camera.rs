use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "camera")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub cam_name: String,
    pub cam_type: String,
    pub cam_ip: String,
    pub cam_port: i32,
    pub cam_user: String,
    pub cam_password: String,
    pub zone_id_in: i32,
    pub zone_id_out: i32,
    pub direction: String,
    pub is_enabled: bool,
    pub is_deleted: bool,
    pub extra: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
