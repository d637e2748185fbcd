use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

/// Supported external fact-checking services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCheckProvider {
    Snopes,
    FactcheckOrg,
    Politifact,
}

impl FactCheckProvider {
    pub const ALL: [FactCheckProvider; 3] = [Self::Snopes, Self::FactcheckOrg, Self::Politifact];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Snopes => "snopes",
            Self::FactcheckOrg => "factcheck_org",
            Self::Politifact => "politifact",
        }
    }

    /// Path appended to the provider's base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Snopes => "/search",
            Self::FactcheckOrg => "/check",
            Self::Politifact => "/factcheck",
        }
    }

    /// Request body in the shape each provider expects
    pub fn payload(&self, claim: &str, language: &str) -> Value {
        match self {
            Self::Snopes => json!({ "query": claim, "language": language }),
            Self::FactcheckOrg => json!({ "statement": claim, "language": language }),
            Self::Politifact => json!({ "claim": claim, "language": language }),
        }
    }
}

impl std::fmt::Display for FactCheckProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration state of a single provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProviderStatus {
    pub enabled: bool,
    pub configured: bool,
    pub base_url: String,
}
