use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i32,
    /// Natural key, also the member stored in the zone reference set
    pub zone_id: i32,
    pub carpark_id: i32,
    pub name: String,
    pub max_capacity: i32,
    pub free_capacity: i32,
    pub last_update: Option<DateTime<Utc>>,
    pub is_enabled: bool,
    pub is_deleted: bool,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreateRequest {
    pub zone_id: i32,
    pub carpark_id: i32,
    pub name: String,
    #[serde(default)]
    pub max_capacity: i32,
    #[serde(default)]
    pub free_capacity: i32,
    pub extra: Option<serde_json::Value>,
}

/// Updatable zone attributes; the zone is addressed by its `zone_id` in the path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneUpdateRequest {
    pub carpark_id: i32,
    pub name: String,
    #[serde(default)]
    pub max_capacity: i32,
    #[serde(default)]
    pub free_capacity: i32,
    pub extra: Option<serde_json::Value>,
}
