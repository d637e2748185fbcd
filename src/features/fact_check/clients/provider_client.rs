use serde_json::Value;

use crate::core::config::ProviderConfig;
use crate::features::fact_check::models::{FactCheckProvider, ProviderStatus};
use crate::features::fact_check::services::FactCheckError;

/// HTTP client for one fact-checking provider
#[derive(Clone)]
pub struct FactCheckProviderClient {
    provider: FactCheckProvider,
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl FactCheckProviderClient {
    pub fn new(
        provider: FactCheckProvider,
        config: ProviderConfig,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            provider,
            config,
            http_client,
        }
    }

    pub fn provider(&self) -> FactCheckProvider {
        self.provider
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    pub fn status(&self) -> ProviderStatus {
        ProviderStatus {
            enabled: self.is_enabled(),
            configured: self.config.api_key.is_some(),
            base_url: self.config.base_url.clone(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.provider.endpoint()
        )
    }

    /// Submit a claim and return the provider's raw JSON verdict
    pub async fn check_claim(&self, claim: &str, language: &str) -> Result<Value, FactCheckError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FactCheckError::NotConfigured(self.provider))?;

        let url = self.url();
        tracing::debug!("Submitting claim to {}: {}", self.provider, url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.provider.payload(claim, language))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{} API error: HTTP {} - {}", self.provider, status, body);
            return Err(FactCheckError::ProviderStatus {
                provider: self.provider,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>, base_url: &str) -> FactCheckProviderClient {
        FactCheckProviderClient::new(
            FactCheckProvider::Politifact,
            ProviderConfig {
                api_key: api_key.map(String::from),
                base_url: base_url.to_string(),
            },
            reqwest::Client::new(),
        )
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client(Some("key"), "https://api.politifact.org/v1/");
        assert_eq!(client.url(), "https://api.politifact.org/v1/factcheck");
    }

    #[test]
    fn test_status_reflects_api_key() {
        let status = client(None, "https://api.politifact.org/v1").status();
        assert!(!status.enabled);
        assert!(!status.configured);
        assert_eq!(status.base_url, "https://api.politifact.org/v1");
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_not_called() {
        let result = client(None, "http://127.0.0.1:1").check_claim("claim", "en").await;
        assert!(matches!(result, Err(FactCheckError::NotConfigured(_))));
    }
}
