mod finding;
mod metadata_analysis;
mod verification_result;

pub use finding::{Finding, Severity};
pub use metadata_analysis::{
    AuthorInfo, AvailableFields, ExifSummary, FieldSet, ImageMetadataAnalysis, MetadataAnalysis,
    Presence, TextMetadataAnalysis, VideoMetadataAnalysis,
};
pub use verification_result::{VerificationAssessment, VerificationResult};
