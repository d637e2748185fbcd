use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    News,
    Science,
    FactChecking,
}

impl SourceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Science => "science",
            Self::FactChecking => "fact_checking",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SourceCredibility {
    pub url: String,
    pub domain: String,
    pub credibility_score: f64,
    pub trusted_source: bool,
    pub source_category: Option<SourceCategory>,
    pub notes: Vec<String>,
}
