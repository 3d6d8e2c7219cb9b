//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_PATH, DEFAULT_LOG_LEVEL, DEFAULT_POOL_SIZE,
};
use crate::impl_domain_status_conversions;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// Scheduling policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SchedulingConfig {
    /// Which concept the club uses for its resource pool.
    #[serde(default)]
    pub resource_kind: ResourceKind,
    /// What happens when the default resource is deleted.
    #[serde(default)]
    pub default_deletion: DefaultDeletionPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

/// Label a club uses for its physical resources. Both share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum ResourceKind {
    #[default]
    Location,
    Room,
}

impl ResourceKind {
    /// Lowercase noun used in diagnostic messages.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Room => "room",
        }
    }
}

impl_domain_status_conversions!(ResourceKind {
    Location => "Location",
    Room => "Room",
});

/// Policy applied when the current default resource is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum DefaultDeletionPolicy {
    /// Refuse with `Conflict`.
    #[default]
    Reject,
    /// Promote another resource, then delete, in one transaction.
    Reassign,
}

impl_domain_status_conversions!(DefaultDeletionPolicy {
    Reject => "Reject",
    Reassign => "Reassign",
});

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
