use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Prediction,
    Training,
}

/// One tracked predict or train call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformanceRecord {
    pub model_version: String,
    pub timestamp: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: RecordKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformanceStats {
    pub model_type: String,
    pub total_predictions: usize,
    pub total_trainings: usize,
    pub recent_predictions: Vec<PerformanceRecord>,
    pub recent_trainings: Vec<PerformanceRecord>,
    pub timestamp: DateTime<Utc>,
}
