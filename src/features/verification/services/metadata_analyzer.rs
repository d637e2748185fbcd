use super::Metadata;
use crate::features::verification::models::{
    AuthorInfo, AvailableFields, ExifSummary, FieldSet, ImageMetadataAnalysis, Presence,
    TextMetadataAnalysis, VideoMetadataAnalysis,
};

const SOURCE_FIELDS: [&str; 3] = ["source", "origin", "publisher"];
const TIME_FIELDS: [&str; 4] = ["created", "modified", "timestamp", "date"];
const IMAGE_FILE_FIELDS: [&str; 4] = ["width", "height", "size", "format"];
const VIDEO_FIELDS: [&str; 5] = ["duration", "width", "height", "codec", "bitrate"];

fn present_fields(metadata: &Metadata, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .filter(|field| metadata.contains_key(**field))
        .map(|field| field.to_string())
        .collect()
}

fn field_set(metadata: &Metadata, candidates: &[&str]) -> FieldSet {
    let fields = present_fields(metadata, candidates);
    FieldSet {
        present: !fields.is_empty(),
        fields,
    }
}

/// Author, source and timestamp provenance for text, HTML and JSON content
pub fn analyze_text_metadata(metadata: &Metadata) -> TextMetadataAnalysis {
    let author_info = match metadata.get("author") {
        Some(author) => AuthorInfo {
            present: true,
            author: Some(author.clone()),
            note: None,
        },
        None => AuthorInfo {
            present: false,
            author: None,
            note: Some("No author information provided".to_string()),
        },
    };

    TextMetadataAnalysis {
        author_info,
        source_info: field_set(metadata, &SOURCE_FIELDS),
        timestamp_info: field_set(metadata, &TIME_FIELDS),
    }
}

pub fn analyze_image_metadata(metadata: &Metadata) -> ImageMetadataAnalysis {
    let exif_data = match metadata.get("exif").and_then(|exif| exif.as_object()) {
        Some(exif) => ExifSummary {
            present: true,
            fields: exif.keys().cloned().collect(),
            note: None,
        },
        None => ExifSummary {
            present: false,
            fields: Vec::new(),
            note: Some("No EXIF data available".to_string()),
        },
    };

    ImageMetadataAnalysis {
        exif_data,
        file_properties: AvailableFields {
            available_fields: present_fields(metadata, &IMAGE_FILE_FIELDS),
        },
    }
}

pub fn analyze_video_metadata(metadata: &Metadata) -> VideoMetadataAnalysis {
    VideoMetadataAnalysis {
        video_properties: AvailableFields {
            available_fields: present_fields(metadata, &VIDEO_FIELDS),
        },
        audio_track: Presence {
            present: metadata
                .get("audio_codec")
                .is_some_and(|codec| !codec.is_null()),
        },
    }
}
