//! Domain constants
//!
//! Centralized location for the defaults shared by configuration, storage and
//! the components.

// Storage defaults
pub const DEFAULT_DB_PATH: &str = "flyball.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Resource defaults
pub const MAX_RESOURCE_NAME_LENGTH: usize = 120;
pub const DEFAULT_IS_DOUBLE_LANE: bool = true;
