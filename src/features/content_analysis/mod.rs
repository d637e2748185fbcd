//! Standalone text, image-metadata and source credibility analysis.

pub mod models;
pub mod services;

pub use services::{ImageMetadataAnalyzer, SourceCredibilityChecker, TextAnalyzer};
