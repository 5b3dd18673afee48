use serde::{Deserialize, Serialize};

/// API client credentials, keyed by `client_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCredential {
    pub id: i32,
    pub client_name: String,
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub api_key: String,
    pub fuzzy_logic: bool,
    pub is_enabled: bool,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentialCreateRequest {
    pub client_name: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_key: String,
    #[serde(default)]
    pub fuzzy_logic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentialUpdateRequest {
    pub client_name: String,
    /// Left unchanged when omitted
    pub client_secret: Option<String>,
    pub api_key: String,
    #[serde(default)]
    pub fuzzy_logic: bool,
}
