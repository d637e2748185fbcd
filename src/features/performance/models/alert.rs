use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::performance::models::SystemMetrics;

const CPU_THRESHOLD: f64 = 80.0;
const MEMORY_THRESHOLD: f64 = 85.0;
const DISK_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighCpu,
    HighMemory,
    HighDisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
}

impl PerformanceAlert {
    /// Alerts for every usage figure strictly above its threshold
    pub fn evaluate(metrics: &SystemMetrics) -> Vec<Self> {
        [
            (
                AlertKind::HighCpu,
                AlertSeverity::Warning,
                "CPU",
                metrics.cpu.percent,
                CPU_THRESHOLD,
            ),
            (
                AlertKind::HighMemory,
                AlertSeverity::Warning,
                "memory",
                metrics.memory.percent,
                MEMORY_THRESHOLD,
            ),
            (
                AlertKind::HighDisk,
                AlertSeverity::Critical,
                "disk",
                metrics.disk.percent,
                DISK_THRESHOLD,
            ),
        ]
        .into_iter()
        .filter(|(_, _, _, value, threshold)| value > threshold)
        .map(|(kind, severity, label, value, threshold)| Self {
            kind,
            severity,
            message: format!("High {} usage: {}%", label, value),
            value,
            threshold,
        })
        .collect()
    }
}
