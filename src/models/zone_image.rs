use serde::{Deserialize, Serialize};

/// Per-language artwork for a zone. Image payloads are opaque text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneImage {
    pub id: i32,
    pub zone_id: i32,
    pub lang: String,
    pub image_sm: String,
    pub image_lg: String,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneImageCreateRequest {
    pub zone_id: i32,
    pub lang: String,
    #[serde(default)]
    pub image_sm: String,
    #[serde(default)]
    pub image_lg: String,
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneImageUpdateRequest {
    pub zone_id: i32,
    pub lang: String,
    #[serde(default)]
    pub image_sm: String,
    #[serde(default)]
    pub image_lg: String,
    pub extra: Option<serde_json::Value>,
}
