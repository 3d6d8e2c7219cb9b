//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Attempt to load from environment variables
//! 2. If `FLYBALL_DB_PATH` is unset or a value is invalid, fall back to a file
//! 3. Probe several paths for config files (JSON or TOML by extension)
//!
//! ## Environment Variables
//! - `FLYBALL_DB_PATH`: Database file path (required)
//! - `FLYBALL_DB_POOL_SIZE`: Connection pool size
//! - `FLYBALL_DB_BUSY_TIMEOUT_MS`: SQLite busy timeout in milliseconds
//! - `FLYBALL_RESOURCE_KIND`: `location` or `room`
//! - `FLYBALL_DEFAULT_DELETION`: `reject` or `reassign`
//! - `FLYBALL_LOG_LEVEL`: tracing filter directive, e.g. `info` or `flyball_core=debug`
//! - `FLYBALL_LOG_JSON`: emit JSON log lines (true/false)
//!
//! ## File Locations
//! 1. `./config.{json,toml}`, then `./flyball.{json,toml}`
//! 2. The same names one and two directories up
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use flyball_domain::constants::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_LOG_LEVEL, DEFAULT_POOL_SIZE};
use flyball_domain::{
    Config, DatabaseConfig, DefaultDeletionPolicy, LoggingConfig, PlannerError, ResourceKind,
    Result, SchedulingConfig,
};

const CONFIG_FILE_STEMS: [&str; 2] = ["config", "flyball"];
const CONFIG_FILE_EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `PlannerError::Config` if neither source yields a valid config.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `FLYBALL_DB_PATH` is required; every other variable falls back to
/// its default when unset.
///
/// # Errors
/// Returns `PlannerError::Config` if the path is missing or a value fails
/// to parse.
pub fn load_from_env() -> Result<Config> {
    let path = env_var("FLYBALL_DB_PATH")?;
    let pool_size = env_parsed("FLYBALL_DB_POOL_SIZE", DEFAULT_POOL_SIZE, "pool size")?;
    let busy_timeout_ms =
        env_parsed("FLYBALL_DB_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS, "busy timeout")?;

    let resource_kind =
        env_parsed("FLYBALL_RESOURCE_KIND", ResourceKind::default(), "resource kind")?;
    let default_deletion = env_parsed(
        "FLYBALL_DEFAULT_DELETION",
        DefaultDeletionPolicy::default(),
        "default deletion policy",
    )?;

    let level = std::env::var("FLYBALL_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
    let json = env_bool("FLYBALL_LOG_JSON", false);

    Ok(Config {
        database: DatabaseConfig { path, pool_size, busy_timeout_ms },
        scheduling: SchedulingConfig { resource_kind, default_deletion },
        logging: LoggingConfig { level, json },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations via
/// [`probe_config_paths`].
///
/// # Errors
/// Returns `PlannerError::Config` if no file is found, it cannot be read,
/// or its contents do not parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PlannerError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PlannerError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PlannerError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, detecting the format from the extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PlannerError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PlannerError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PlannerError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots.iter().flat_map(|root| candidate_paths(root)).find(|path| path.exists())
}

/// Candidate file names under `root` and its two nearest ancestors.
fn candidate_paths(root: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for dir in [root.to_path_buf(), root.join(".."), root.join("../..")] {
        for stem in CONFIG_FILE_STEMS {
            for extension in CONFIG_FILE_EXTENSIONS {
                candidates.push(dir.join(format!("{stem}.{extension}")));
            }
        }
    }
    candidates
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PlannerError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional variable, falling back to `default` when unset.
fn env_parsed<T>(key: &str, default: T, label: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PlannerError::Config(format!("Invalid {label}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
