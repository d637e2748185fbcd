use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Presence report for a single metadata property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Presence {
    pub present: bool,
}

/// Which of a known set of metadata fields were supplied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldSet {
    pub present: bool,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AvailableFields {
    pub available_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorInfo {
    pub present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub author: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExifSummary {
    pub present: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Provenance analysis for text-like content (plain text, HTML, JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextMetadataAnalysis {
    pub author_info: AuthorInfo,
    pub source_info: FieldSet,
    pub timestamp_info: FieldSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageMetadataAnalysis {
    pub exif_data: ExifSummary,
    pub file_properties: AvailableFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VideoMetadataAnalysis {
    pub video_properties: AvailableFields,
    pub audio_track: Presence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MetadataAnalysis {
    Text(TextMetadataAnalysis),
    Image(ImageMetadataAnalysis),
    Video(VideoMetadataAnalysis),
}
