use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// What a single provider said about a claim
///
/// A provider that could not be reached is reported as `Failed`; its verdict is
/// never synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderOutcome {
    Failed { error: String, verified: bool },
    Verdict(Value),
}

impl ProviderOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
            verified: false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The provider's `rating` field, lowercased, when present
    pub fn rating(&self) -> Option<String> {
        match self {
            Self::Verdict(value) => value
                .get("rating")
                .and_then(Value::as_str)
                .map(str::to_lowercase),
            Self::Failed { .. } => None,
        }
    }
}

/// Aggregated provider answers for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClaimVerificationReport {
    pub claim: String,
    /// Keyed by provider name
    #[schema(value_type = Object)]
    pub results: BTreeMap<String, ProviderOutcome>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_outcome_shape() {
        let outcome = ProviderOutcome::failed("connection refused");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, json!({ "error": "connection refused", "verified": false }));
        assert!(outcome.is_error());
        assert_eq!(outcome.rating(), None);
    }

    #[test]
    fn test_verdict_round_trips_from_stored_json() {
        let stored = json!({ "verified": true, "rating": "Mostly_True", "confidence": 0.8 });
        let outcome: ProviderOutcome = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(outcome, ProviderOutcome::Verdict(stored));
        assert_eq!(outcome.rating().as_deref(), Some("mostly_true"));
    }

    #[test]
    fn test_stored_failure_deserializes_as_failed() {
        let stored = json!({ "error": "timeout", "verified": false });
        let outcome: ProviderOutcome = serde_json::from_value(stored).unwrap();
        assert!(outcome.is_error());
    }
}
