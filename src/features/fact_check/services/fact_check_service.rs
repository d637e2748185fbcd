use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;

use super::{ClaimVerifier, FactCheckError};
use crate::core::config::FactCheckConfig;
use crate::features::fact_check::clients::FactCheckProviderClient;
use crate::features::fact_check::models::{
    ClaimVerificationReport, FactCheckProvider, ProviderOutcome, ProviderStatus,
};
use crate::shared::validation::LANGUAGE_CODE_REGEX;

/// Fans a claim out to every configured fact-checking provider
pub struct FactCheckService {
    clients: Vec<FactCheckProviderClient>,
}

impl FactCheckService {
    pub fn new(config: &FactCheckConfig) -> Result<Self, FactCheckError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let clients = FactCheckProvider::ALL
            .into_iter()
            .map(|provider| {
                let provider_config = match provider {
                    FactCheckProvider::Snopes => config.snopes.clone(),
                    FactCheckProvider::FactcheckOrg => config.factcheck_org.clone(),
                    FactCheckProvider::Politifact => config.politifact.clone(),
                };
                FactCheckProviderClient::new(provider, provider_config, http_client.clone())
            })
            .collect();

        Ok(Self { clients })
    }

    /// Configuration state of every known provider, keyed by name
    pub fn status(&self) -> BTreeMap<String, ProviderStatus> {
        self.clients
            .iter()
            .map(|client| (client.provider().name().to_string(), client.status()))
            .collect()
    }

    pub fn enabled_providers(&self) -> Vec<FactCheckProvider> {
        self.clients
            .iter()
            .filter(|client| client.is_enabled())
            .map(FactCheckProviderClient::provider)
            .collect()
    }

    /// Query all enabled providers concurrently
    ///
    /// Provider failures are recorded per provider and never fail the whole
    /// report.
    pub async fn check(
        &self,
        claim: &str,
        language: &str,
    ) -> Result<ClaimVerificationReport, FactCheckError> {
        let claim = claim.trim();
        if claim.is_empty() {
            return Err(FactCheckError::EmptyClaim);
        }
        if !LANGUAGE_CODE_REGEX.is_match(language) {
            return Err(FactCheckError::InvalidLanguage(language.to_string()));
        }

        let enabled: Vec<&FactCheckProviderClient> =
            self.clients.iter().filter(|c| c.is_enabled()).collect();

        let outcomes = join_all(
            enabled
                .iter()
                .map(|client| client.check_claim(claim, language)),
        )
        .await;

        let results: BTreeMap<String, ProviderOutcome> = enabled
            .iter()
            .zip(outcomes)
            .map(|(client, outcome)| {
                let provider = client.provider();
                let outcome = match outcome {
                    Ok(verdict) => ProviderOutcome::Verdict(verdict),
                    Err(e) => {
                        tracing::error!("Error verifying claim with {}: {}", provider, e);
                        ProviderOutcome::failed(e.to_string())
                    }
                };
                (provider.name().to_string(), outcome)
            })
            .collect();

        for (provider, outcome) in &results {
            if let Some(rating) = outcome.rating() {
                tracing::debug!("{} rated claim as {}", provider, rating);
            }
        }
        tracing::info!(
            "Claim checked by {} providers ({} failed)",
            results.len(),
            results.values().filter(|o| o.is_error()).count()
        );

        Ok(ClaimVerificationReport {
            claim: claim.to_string(),
            results,
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl ClaimVerifier for FactCheckService {
    fn is_available(&self) -> bool {
        self.clients.iter().any(FactCheckProviderClient::is_enabled)
    }

    async fn verify_claim(
        &self,
        claim: &str,
        language: &str,
    ) -> Result<ClaimVerificationReport, FactCheckError> {
        self.check(claim, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProviderConfig;
    use std::time::Duration;

    fn config_with_snopes(base_url: &str) -> FactCheckConfig {
        let mut config = FactCheckConfig::disabled();
        config.snopes = ProviderConfig {
            api_key: Some("test-key".to_string()),
            base_url: base_url.to_string(),
        };
        config.request_timeout = Duration::from_millis(500);
        config
    }

    #[test]
    fn test_status_lists_every_provider() {
        let service = FactCheckService::new(&FactCheckConfig::disabled()).unwrap();
        let status = service.status();

        assert_eq!(status.len(), 3);
        assert!(status.values().all(|s| !s.enabled && !s.configured));
        assert!(!service.is_available());
    }

    #[tokio::test]
    async fn test_no_enabled_providers_yields_empty_results() {
        let service = FactCheckService::new(&FactCheckConfig::disabled()).unwrap();
        let report = service.check("  Water boils at 100C  ", "en").await.unwrap();

        assert_eq!(report.claim, "Water boils at 100C");
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_empty_claim_and_bad_language() {
        let service = FactCheckService::new(&FactCheckConfig::disabled()).unwrap();

        assert!(matches!(
            service.check("   ", "en").await,
            Err(FactCheckError::EmptyClaim)
        ));
        assert!(matches!(
            service.check("claim", "english").await,
            Err(FactCheckError::InvalidLanguage(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_reported_not_fabricated() {
        // Port 1 on loopback refuses connections
        let service = FactCheckService::new(&config_with_snopes("http://127.0.0.1:1")).unwrap();
        assert!(service.is_available());
        assert_eq!(service.enabled_providers(), vec![FactCheckProvider::Snopes]);

        let report = service.verify_claim("The moon is cheese", "en").await.unwrap();
        let outcome = report.results.get("snopes").unwrap();

        assert!(outcome.is_error());
        assert_eq!(outcome.rating(), None);
        assert!(!report.results.contains_key("politifact"));
    }
}
