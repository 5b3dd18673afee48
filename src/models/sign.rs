use serde::{Deserialize, Serialize};

/// A variable message sign displaying the free capacity of one zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sign {
    pub id: i32,
    pub sign_id: i32,
    pub sign_name: String,
    pub sign_type: String,
    pub sign_ip: String,
    pub sign_port: i32,
    pub zone_id: i32,
    pub is_enabled: bool,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignCreateRequest {
    pub sign_id: i32,
    pub sign_name: String,
    #[serde(default)]
    pub sign_type: String,
    pub sign_ip: String,
    #[serde(default)]
    pub sign_port: i32,
    #[serde(default)]
    pub zone_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpdateRequest {
    pub sign_name: String,
    #[serde(default)]
    pub sign_type: String,
    pub sign_ip: String,
    #[serde(default)]
    pub sign_port: i32,
    #[serde(default)]
    pub zone_id: i32,
}
