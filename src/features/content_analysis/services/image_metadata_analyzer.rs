use serde_json::Value;

use crate::features::content_analysis::models::{EditingIndicator, ImageIntegrityReport};
use crate::features::verification::Metadata;

const SOFTWARE_FIELDS: [&str; 4] = ["Software", "ImageDescription", "Make", "Model"];
const EDITING_TOOLS: [&str; 5] = ["photoshop", "gimp", "paint", "snapseed", "vsco"];

/// Checks client-supplied image metadata for integrity and editing traces
#[derive(Debug, Clone, Default)]
pub struct ImageMetadataAnalyzer;

impl ImageMetadataAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, metadata: &Metadata) -> ImageIntegrityReport {
        let exif = metadata
            .get("exif")
            .and_then(Value::as_object)
            .filter(|exif| !exif.is_empty());

        let Some(exif) = exif else {
            return ImageIntegrityReport {
                metadata_integrity: 0.3,
                editing_indicators: Vec::new(),
                compatibility_issues: vec!["Missing EXIF data".to_string()],
                confidence: 0.4,
            };
        };

        let editing_indicators = SOFTWARE_FIELDS
            .iter()
            .filter_map(|field| {
                let value = match exif.get(*field)? {
                    Value::String(s) => s.to_lowercase(),
                    other => other.to_string().to_lowercase(),
                };
                EDITING_TOOLS
                    .iter()
                    .any(|tool| value.contains(tool))
                    .then(|| EditingIndicator {
                        tool: value,
                        field: field.to_string(),
                    })
            })
            .collect();

        ImageIntegrityReport {
            metadata_integrity: 0.9,
            editing_indicators,
            compatibility_issues: Vec::new(),
            confidence: 0.7,
        }
    }
}
