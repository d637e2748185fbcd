mod database_monitor;
mod performance_service;
mod request_profiler;
mod system_monitor;

pub use database_monitor::DatabaseMonitor;
pub use performance_service::PerformanceService;
pub use request_profiler::{profile_requests, RequestProfiler};
pub use system_monitor::SystemMonitor;
