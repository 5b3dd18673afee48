use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sighting of a vehicle currently inside the facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentCar {
    pub id: i32,
    pub car_details_id: i32,
    pub camera_id: i32,
    pub confidence: i32,
    pub curr_zone_id: i32,
    pub last_zone_id: i32,
    pub direction: String,
    pub lpn: String,
    pub transaction_date: DateTime<Utc>,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentCarCreateRequest {
    #[serde(default)]
    pub car_details_id: i32,
    pub camera_id: i32,
    #[serde(default)]
    pub confidence: i32,
    pub curr_zone_id: i32,
    pub last_zone_id: i32,
    #[serde(default)]
    pub direction: String,
    pub lpn: String,
    /// Defaults to the time of insertion
    pub transaction_date: Option<DateTime<Utc>>,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentCarUpdateRequest {
    pub camera_id: i32,
    #[serde(default)]
    pub confidence: i32,
    pub curr_zone_id: i32,
    pub last_zone_id: i32,
    #[serde(default)]
    pub direction: String,
    pub lpn: String,
    pub extra: Option<serde_json::Value>,
}
