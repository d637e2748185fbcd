pub mod ai;
pub mod content_analysis;
pub mod contents;
pub mod dashboard;
pub mod deepfake;
pub mod fact_check;
pub mod ml;
pub mod performance;
pub mod streaming;
pub mod verification;
