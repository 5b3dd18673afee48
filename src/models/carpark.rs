use serde::{Deserialize, Serialize};

/// A parking facility. Carparks carry no lifecycle state and are hard-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carpark {
    pub id: i32,
    #[serde(rename = "type")]
    pub carpark_type: String,
    pub name: String,
    pub capacity: i32,
    /// Localised display strings keyed by language code
    pub language: Option<serde_json::Value>,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarparkCreateRequest {
    #[serde(rename = "type")]
    pub carpark_type: String,
    pub name: String,
    #[serde(default)]
    pub capacity: i32,
    pub language: Option<serde_json::Value>,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarparkUpdateRequest {
    #[serde(rename = "type")]
    pub carpark_type: String,
    pub name: String,
    #[serde(default)]
    pub capacity: i32,
    pub language: Option<serde_json::Value>,
    pub extra: Option<serde_json::Value>,
}
