use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::performance::models::{
    PerformanceAlert, ProcessMetrics, RequestProfile, SystemMetrics,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConnectionStatsDto {
    /// Connections currently open, idle or in use
    pub size: u32,
    pub idle: u32,
    pub active: u32,
    pub max_connections: u32,
    /// Active connections as a share of `max_connections`
    pub utilization_percent: f64,
}

/// Activity counters from `pg_stat_database`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseStatsDto {
    pub database_name: String,
    pub active_backends: i64,
    pub transactions_committed: i64,
    pub transactions_rolled_back: i64,
    pub blocks_read: i64,
    pub blocks_hit: i64,
    /// `null` until any block has been read
    pub cache_hit_ratio: Option<f64>,
    pub rows_returned: i64,
    pub rows_fetched: i64,
    pub rows_inserted: i64,
    pub rows_updated: i64,
    pub rows_deleted: i64,
    pub deadlocks: i64,
    pub size_mb: f64,
    pub pool: ConnectionStatsDto,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProfileQuery {
    /// Profile key such as `GET /api/contents/{id}`
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileListDto {
    pub profiles: Vec<RequestProfile>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClearedProfilesDto {
    pub cleared: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Number of most recent points, default 100
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlertsDto {
    pub alerts: Vec<PerformanceAlert>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceAveragesDto {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    /// Number of history points averaged
    pub sample_size: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResourceReportDto {
    pub generated_at: DateTime<Utc>,
    pub current_metrics: SystemMetrics,
    pub process_metrics: ProcessMetrics,
    /// Averages over the most recent samples, `null` before the first sample
    pub averages: Option<ResourceAveragesDto>,
    pub alerts: Vec<PerformanceAlert>,
    pub data_points_count: usize,
}
