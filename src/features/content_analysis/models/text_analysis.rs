use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Matches of one named pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatternHits {
    #[serde(rename = "type")]
    pub kind: String,
    pub matches: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextIndicators {
    pub misinformation: Vec<PatternHits>,
    pub credibility: Vec<PatternHits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Readability {
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextAnalysis {
    pub misinformation_score: f64,
    pub credibility_score: f64,
    pub indicators: TextIndicators,
    pub word_count: usize,
    pub sentence_count: usize,
    pub readability_metrics: Readability,
    pub confidence: f64,
}
