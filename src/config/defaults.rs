/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./fyc-registry.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Store defaults
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 5;

// Reference cache defaults
pub const DEFAULT_REFRESH_TIMEOUT_SECS: u64 = 10;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment variable prefix for overrides, e.g. FYC_WEB__PORT=9090
pub const ENV_PREFIX: &str = "FYC_";
