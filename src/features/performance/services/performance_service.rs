use std::sync::Arc;

use sqlx::PgPool;
use tokio::task::JoinHandle;

use super::{DatabaseMonitor, RequestProfiler, SystemMonitor};
use crate::core::config::PerformanceConfig;

/// Database, request and host monitors behind the performance endpoints
pub struct PerformanceService {
    database: DatabaseMonitor,
    profiler: Arc<RequestProfiler>,
    monitor: Arc<SystemMonitor>,
    config: PerformanceConfig,
}

impl PerformanceService {
    pub fn new(pool: PgPool, config: PerformanceConfig) -> Self {
        Self {
            database: DatabaseMonitor::new(pool),
            profiler: Arc::new(RequestProfiler::new(config.slow_request_threshold)),
            monitor: Arc::new(SystemMonitor::new(config.history_size)),
            config,
        }
    }

    pub fn database(&self) -> &DatabaseMonitor {
        &self.database
    }

    /// Shared with the profiling middleware
    pub fn profiler(&self) -> Arc<RequestProfiler> {
        Arc::clone(&self.profiler)
    }

    pub fn monitor(&self) -> &SystemMonitor {
        &self.monitor
    }

    pub fn start_sampler(&self) -> JoinHandle<()> {
        Arc::clone(&self.monitor).spawn_sampler(self.config.sample_interval)
    }
}
