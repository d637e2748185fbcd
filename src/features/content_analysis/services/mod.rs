mod image_metadata_analyzer;
mod source_credibility_checker;
mod text_analyzer;

pub use image_metadata_analyzer::ImageMetadataAnalyzer;
pub use source_credibility_checker::SourceCredibilityChecker;
pub use text_analyzer::TextAnalyzer;
