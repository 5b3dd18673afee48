//! Configuration model
//!
//! Loaded from a TOML file merged with `FYC_`-prefixed environment variables
//! (nested keys separated by `__`). CLI flags are applied on top in `main`.

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use crate::models::{EntityKind, ReferencePolicy};
use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Entity store call settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Deadline applied to every store call made on behalf of a request
    #[serde(default = "default_operation_timeout", with = "duration_serde")]
    pub operation_timeout: Duration,
}

/// Reference cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Deadline for a single refresh of one reference set
    #[serde(default = "default_refresh_timeout", with = "duration_serde")]
    pub refresh_timeout: Duration,
}

/// What to do with a reference that is not in its set, per dependent entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_coerce")]
    pub camera: ReferencePolicy,
    #[serde(default = "default_coerce")]
    pub sign: ReferencePolicy,
    #[serde(default = "default_reject")]
    pub zone: ReferencePolicy,
    #[serde(default = "default_reject")]
    pub present_car: ReferencePolicy,
    #[serde(default = "default_reject")]
    pub zone_image: ReferencePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_operation_timeout() -> Duration {
    Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS)
}

fn default_refresh_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REFRESH_TIMEOUT_SECS)
}

fn default_coerce() -> ReferencePolicy {
    ReferencePolicy::CoerceToUnassigned
}

fn default_reject() -> ReferencePolicy {
    ReferencePolicy::Reject
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            operation_timeout: default_operation_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_timeout: default_refresh_timeout(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            camera: default_coerce(),
            sign: default_coerce(),
            zone: default_reject(),
            present_car: default_reject(),
            zone_image: default_reject(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

impl ValidationConfig {
    /// Policy configured for a dependent entity kind; kinds without references reject
    pub fn policy_for(&self, kind: EntityKind) -> ReferencePolicy {
        match kind {
            EntityKind::Camera => self.camera,
            EntityKind::Sign => self.sign,
            EntityKind::Zone => self.zone,
            EntityKind::PresentCar => self.present_car,
            EntityKind::ZoneImage => self.zone_image,
            _ => ReferencePolicy::Reject,
        }
    }
}

impl Config {
    /// Load from `config.toml` (or `CONFIG_FILE`) plus environment overrides
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from_file(config_file: impl AsRef<Path>) -> Result<Self> {
        let config_file = config_file.as_ref();
        if config_file.exists() {
            info!("Loading configuration from {}", config_file.display());
        } else {
            info!(
                "Config file {} not found, using defaults",
                config_file.display()
            );
        }

        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Invalid configuration in {}", config_file.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.web.port, DEFAULT_PORT);
        assert_eq!(config.store.operation_timeout, Duration::from_secs(5));
        assert_eq!(config.cache.refresh_timeout, Duration::from_secs(10));
        assert_eq!(config.validation.camera, ReferencePolicy::CoerceToUnassigned);
        assert_eq!(config.validation.sign, ReferencePolicy::CoerceToUnassigned);
        assert_eq!(config.validation.zone, ReferencePolicy::Reject);
        assert_eq!(config.validation.present_car, ReferencePolicy::Reject);
        assert_eq!(config.validation.zone_image, ReferencePolicy::Reject);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml_from_str(
            r#"
            [store]
            operation_timeout = "250ms"

            [validation]
            camera = "reject"
            "#,
        );
        assert_eq!(config.store.operation_timeout, Duration::from_millis(250));
        assert_eq!(config.validation.camera, ReferencePolicy::Reject);
        assert_eq!(config.validation.sign, ReferencePolicy::CoerceToUnassigned);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from_file("/nonexistent/fyc-registry.toml").unwrap();
        assert_eq!(config.web.host, DEFAULT_HOST);
        assert_eq!(config.cache.refresh_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_policy_for_kinds() {
        let validation = ValidationConfig::default();
        assert_eq!(
            validation.policy_for(EntityKind::Camera),
            ReferencePolicy::CoerceToUnassigned
        );
        assert_eq!(validation.policy_for(EntityKind::User), ReferencePolicy::Reject);
    }

    fn toml_from_str(contents: &str) -> Config {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string(contents))
            .extract()
            .unwrap()
    }
}
