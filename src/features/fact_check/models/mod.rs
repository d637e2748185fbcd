mod claim_report;
mod provider;

pub use claim_report::{ClaimVerificationReport, ProviderOutcome};
pub use provider::{FactCheckProvider, ProviderStatus};
