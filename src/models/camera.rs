use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: i32,
    pub cam_name: String,
    pub cam_type: String,
    pub cam_ip: String,
    pub cam_port: i32,
    pub cam_user: String,
    #[serde(skip_serializing)]
    pub cam_password: String,
    pub zone_id_in: i32,
    pub zone_id_out: i32,
    pub direction: String,
    pub is_enabled: bool,
    pub is_deleted: bool,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraCreateRequest {
    pub cam_name: String,
    #[serde(default)]
    pub cam_type: String,
    pub cam_ip: String,
    #[serde(default)]
    pub cam_port: i32,
    #[serde(default)]
    pub cam_user: String,
    #[serde(default)]
    pub cam_password: String,
    #[serde(default)]
    pub zone_id_in: i32,
    #[serde(default)]
    pub zone_id_out: i32,
    #[serde(default)]
    pub direction: String,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraUpdateRequest {
    pub cam_name: String,
    #[serde(default)]
    pub cam_type: String,
    pub cam_ip: String,
    #[serde(default)]
    pub cam_port: i32,
    #[serde(default)]
    pub cam_user: String,
    #[serde(default)]
    pub cam_password: String,
    #[serde(default)]
    pub zone_id_in: i32,
    #[serde(default)]
    pub zone_id_out: i32,
    #[serde(default)]
    pub direction: String,
    pub extra: Option<serde_json::Value>,
}
