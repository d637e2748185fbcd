mod deepfake_engine;

pub use deepfake_engine::DeepfakeDetectionEngine;
