use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Timing statistics for one route, keyed as `METHOD /matched/path`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestProfile {
    #[schema(example = "GET /api/contents/{id}")]
    pub name: String,
    pub calls: u64,
    pub total_ms: f64,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Calls that took longer than the configured slow threshold
    pub slow_calls: u64,
    pub last_status: u16,
    pub last_called_at: DateTime<Utc>,
}
