//! Metadata-driven deepfake likelihood estimation for images and videos.

pub mod models;
pub mod services;

pub use models::MediaKind;
pub use services::DeepfakeDetectionEngine;
