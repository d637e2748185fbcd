//! Heuristic content verification: MIME-dispatched scoring of uploaded content.

pub mod models;
pub mod services;

pub use services::{ContentVerificationEngine, Metadata, SUPPORTED_CONTENT_TYPES};
