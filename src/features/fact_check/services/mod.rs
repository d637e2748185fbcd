mod claim_verifier;
mod fact_check_service;

pub use claim_verifier::{ClaimVerifier, FactCheckError};
pub use fact_check_service::FactCheckService;
