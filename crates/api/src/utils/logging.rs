//! Logging setup and stable error labels

use flyball_domain::{LoggingConfig, PlannerError};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level` when set. Returns `false` when a
/// subscriber was already installed, leaving that one in place.
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(flyball_domain::constants::DEFAULT_LOG_LEVEL));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(false)).try_init().is_ok()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init().is_ok()
    };

    if installed {
        info!(level = %config.level, json = config.json, "logging initialised");
    }
    installed
}

/// Convert a `PlannerError` into a stable label suitable for metrics/logging.
#[inline]
pub fn error_label(error: &PlannerError) -> &'static str {
    match error {
        PlannerError::Validation(_) => "validation",
        PlannerError::NotFound(_) => "not_found",
        PlannerError::Conflict(_) => "conflict",
        PlannerError::Database(_) => "database",
        PlannerError::Config(_) => "config",
        PlannerError::Internal(_) => "internal",
    }
}
