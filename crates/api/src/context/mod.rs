//! Application context - dependency injection container

use std::sync::Arc;

use flyball_core::{
    AttendanceLedger, Clock, PlannerStore, PracticeScheduler, ResourcePool, SetOrderingEngine,
    SystemClock, TxMode,
};
use flyball_domain::{Config, PlannerError, Result};
use flyball_infra::{config, DbManager, SqliteStore};
use tokio::task;
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds the store and the scheduling components
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub store: Arc<dyn PlannerStore>,

    pub resources: Arc<ResourcePool>,
    pub practices: Arc<PracticeScheduler>,
    pub sets: Arc<SetOrderingEngine>,
    pub attendance: Arc<AttendanceLedger>,
}

impl AppContext {
    /// Build a context from the environment.
    ///
    /// A local `.env` file is read first, then configuration is loaded from
    /// `FLYBALL_*` variables or a config file.
    pub async fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "loaded .env"),
            Err(err) => warn!(error = %err, "no .env file loaded"),
        }

        let config = config::load()?;
        Self::new(config).await
    }

    /// Create a new application context with the wall clock.
    pub async fn new(config: Config) -> Result<Self> {
        Self::new_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Create a new application context with a custom clock
    ///
    /// Tests use this to pin "now" for the practice scheduling checks.
    pub async fn new_with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let database = config.database.clone();

        // Opening the pool and migrating both touch the file system.
        let db = task::spawn_blocking(move || -> Result<DbManager> {
            let db = DbManager::from_config(&database)?;
            db.run_migrations()?;
            Ok(db)
        })
        .await
        .map_err(|err| PlannerError::Internal(format!("database startup task failed: {err}")))??;
        let db = Arc::new(db);

        let store: Arc<dyn PlannerStore> = Arc::new(SqliteStore::new(Arc::clone(&db)));

        let resources = Arc::new(ResourcePool::new(Arc::clone(&store), config.scheduling));
        let practices = Arc::new(PracticeScheduler::new(Arc::clone(&store), clock));
        let sets = Arc::new(SetOrderingEngine::new(Arc::clone(&store)));
        let attendance = Arc::new(AttendanceLedger::new(Arc::clone(&store)));

        info!(
            db_path = %db.path().display(),
            resource_kind = %config.scheduling.resource_kind,
            default_deletion = %config.scheduling.default_deletion,
            "application context ready"
        );

        Ok(Self { config, db, store, resources, practices, sets, attendance })
    }

    /// Check database connectivity and that a store transaction can open.
    pub async fn health(&self) -> HealthStatus {
        let db = Arc::clone(&self.db);
        let store = Arc::clone(&self.store);

        let components = task::spawn_blocking(move || {
            let database = match db.health_check() {
                Ok(()) => ComponentHealth::healthy("database"),
                Err(err) => ComponentHealth::unhealthy("database", err.to_string()),
            };
            let transactions = match store.begin(TxMode::Read) {
                Ok(_) => ComponentHealth::healthy("store"),
                Err(err) => ComponentHealth::unhealthy("store", err.to_string()),
            };
            vec![database, transactions]
        })
        .await;

        let mut status = match components {
            Ok(components) => {
                components.into_iter().fold(HealthStatus::new(), HealthStatus::add_component)
            }
            Err(err) => HealthStatus::new()
                .add_component(ComponentHealth::unhealthy("health_check", err.to_string())),
        };
        status.calculate_score();

        if !status.is_healthy {
            warn!(score = status.score, message = ?status.message, "health check failed");
        }
        status
    }
}
