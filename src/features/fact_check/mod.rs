//! Third-party fact-check providers and the claim verifier seam used by the
//! verification engine.

pub mod clients;
pub mod models;
pub mod services;

pub use services::{ClaimVerifier, FactCheckError, FactCheckService};
