mod alert;
mod metrics;
mod profile;

pub use alert::{AlertKind, AlertSeverity, PerformanceAlert};
pub use metrics::{
    CpuMetrics, DiskMetrics, MemoryMetrics, MonitoringPoint, NetworkMetrics, ProcessMemory,
    ProcessMetrics, SystemMetrics,
};
pub use profile::RequestProfile;
