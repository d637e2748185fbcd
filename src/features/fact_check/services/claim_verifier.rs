use async_trait::async_trait;
use thiserror::Error;

use crate::core::error::AppError;
use crate::features::fact_check::models::{ClaimVerificationReport, FactCheckProvider};

#[derive(Debug, Error)]
pub enum FactCheckError {
    #[error("Claim must not be empty")]
    EmptyClaim,

    #[error("Unsupported language code: {0}")]
    InvalidLanguage(String),

    #[error("Provider {0} has no API key configured")]
    NotConfigured(FactCheckProvider),

    #[error("Provider {provider} responded with HTTP {status}")]
    ProviderStatus {
        provider: FactCheckProvider,
        status: u16,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<FactCheckError> for AppError {
    fn from(err: FactCheckError) -> Self {
        match err {
            FactCheckError::EmptyClaim | FactCheckError::InvalidLanguage(_) => {
                AppError::Validation(err.to_string())
            }
            FactCheckError::NotConfigured(_) => AppError::BadRequest(err.to_string()),
            FactCheckError::ProviderStatus { .. } | FactCheckError::Http(_) => {
                AppError::ExternalServiceError(err.to_string())
            }
        }
    }
}

/// Something that can check a free-text claim against external sources
#[async_trait]
pub trait ClaimVerifier: Send + Sync {
    /// Whether any backing source is configured
    fn is_available(&self) -> bool;

    async fn verify_claim(
        &self,
        claim: &str,
        language: &str,
    ) -> Result<ClaimVerificationReport, FactCheckError>;
}
