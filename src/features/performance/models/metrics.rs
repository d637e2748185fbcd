use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CpuMetrics {
    pub percent: f64,
    pub count: usize,
    pub frequency_mhz: u64,
}

/// Sizes in GB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemoryMetrics {
    pub total_gb: f64,
    pub available_gb: f64,
    pub used_gb: f64,
    pub percent: f64,
    pub swap_percent: f64,
}

/// Usage of the filesystem mounted at `/`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiskMetrics {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent: f64,
}

/// Totals across every interface since boot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NetworkMetrics {
    pub bytes_sent_mb: f64,
    pub bytes_recv_mb: f64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SystemMetrics {
    pub timestamp: DateTime<Utc>,
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub disk: DiskMetrics,
    pub network: NetworkMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessMemory {
    pub rss_mb: f64,
    pub vms_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessMetrics {
    pub timestamp: DateTime<Utc>,
    pub pid: u32,
    pub name: String,
    pub status: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_info: ProcessMemory,
    /// Not reported on every platform
    pub num_threads: Option<usize>,
}

/// One entry of the sampled history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonitoringPoint {
    pub timestamp: DateTime<Utc>,
    pub system: SystemMetrics,
    pub process: ProcessMetrics,
}
