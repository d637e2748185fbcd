mod metadata_analyzer;
mod patterns;
mod verification_engine;

pub use metadata_analyzer::{analyze_image_metadata, analyze_text_metadata, analyze_video_metadata};
pub use patterns::{ScoringPattern, HTML_PATTERNS, TEXT_MATCH_CAP, TEXT_PATTERNS};
pub use verification_engine::{
    content_fingerprint, ContentVerificationEngine, Metadata, SUPPORTED_CONTENT_TYPES,
};
