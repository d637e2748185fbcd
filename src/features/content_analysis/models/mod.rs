mod image_integrity;
mod source_credibility;
mod text_analysis;

pub use image_integrity::{EditingIndicator, ImageIntegrityReport};
pub use source_credibility::{SourceCategory, SourceCredibility};
pub use text_analysis::{PatternHits, Readability, TextAnalysis, TextIndicators};
