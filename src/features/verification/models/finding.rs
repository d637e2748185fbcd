use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity attached to a finding or indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    /// Evidence in favour of authenticity
    Positive,
}

/// A single triggered verification heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Finding {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            severity,
            matches: None,
            count: None,
            recommendation: None,
        }
    }

    pub fn with_matches(mut self, matches: Vec<String>) -> Self {
        self.count = Some(matches.len());
        self.matches = Some(matches);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}
