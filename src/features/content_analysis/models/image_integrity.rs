use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An EXIF field naming a known editing tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EditingIndicator {
    pub tool: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageIntegrityReport {
    pub metadata_integrity: f64,
    pub editing_indicators: Vec<EditingIndicator>,
    pub compatibility_issues: Vec<String>,
    pub confidence: f64,
}
