use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::metadata_analyzer::{analyze_image_metadata, analyze_text_metadata, analyze_video_metadata};
use super::patterns::{HTML_MATCH_CAP, HTML_PATTERNS, TEXT_MATCH_CAP, TEXT_PATTERNS};
use crate::features::fact_check::ClaimVerifier;
use crate::features::verification::models::{
    Finding, MetadataAnalysis, Severity, VerificationAssessment, VerificationResult,
};

/// Free-form key/value metadata accompanying a piece of content
pub type Metadata = serde_json::Map<String, Value>;

/// MIME types with a dedicated verification handler
pub const SUPPORTED_CONTENT_TYPES: [&str; 6] = [
    "text/plain",
    "text/html",
    "image/jpeg",
    "image/png",
    "video/mp4",
    "application/json",
];

const CLAIM_MIN_CHARS: usize = 10;
const CLAIM_MAX_CHARS: usize = 500;
const CLAIM_LANGUAGE: &str = "en";

const EDITING_TOOLS: [&str; 3] = ["photoshop", "gimp", "paint"];
const JSON_TIMESTAMP_FIELDS: [&str; 4] = ["timestamp", "created", "date", "time"];

/// First 16 hex characters of the SHA-256 digest of `content`
pub fn content_fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut id = hex::encode(digest);
    id.truncate(16);
    id
}

struct HandlerOutcome {
    score: f64,
    confidence: f64,
    findings: Vec<Finding>,
    metadata_analysis: Option<MetadataAnalysis>,
}

impl HandlerOutcome {
    fn new(score: f64, confidence: f64) -> Self {
        Self {
            score,
            confidence,
            findings: Vec::new(),
            metadata_analysis: None,
        }
    }
}

/// Heuristic authenticity scoring for uploaded content
#[derive(Clone, Default)]
pub struct ContentVerificationEngine {
    claim_verifier: Option<Arc<dyn ClaimVerifier>>,
}

impl ContentVerificationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an external claim checker consulted for text-like content
    pub fn with_claim_verifier(claim_verifier: Arc<dyn ClaimVerifier>) -> Self {
        Self {
            claim_verifier: Some(claim_verifier),
        }
    }

    pub fn supports(content_type: &str) -> bool {
        SUPPORTED_CONTENT_TYPES.contains(&content_type)
    }

    fn is_text_like(content_type: &str) -> bool {
        matches!(content_type, "text/plain" | "text/html" | "application/json")
    }

    /// Run the local heuristics only
    pub fn evaluate(
        &self,
        content: &[u8],
        content_type: &str,
        metadata: &Metadata,
    ) -> VerificationResult {
        let outcome = match content_type {
            "text/plain" => self.verify_text(content, metadata),
            "text/html" => self.verify_html(content, metadata),
            "image/jpeg" | "image/png" => self.verify_image(metadata),
            "video/mp4" => self.verify_video(metadata),
            "application/json" => self.verify_json(content, metadata),
            other => {
                let mut outcome = HandlerOutcome::new(0.1, 0.1);
                outcome.findings.push(Finding::new(
                    "unsupported_content_type",
                    format!("Content type {} not supported for verification", other),
                    Severity::Low,
                ));
                outcome
            }
        };

        VerificationResult {
            content_id: content_fingerprint(content),
            timestamp: Utc::now(),
            content_type: content_type.to_string(),
            verification_score: outcome.score,
            confidence: outcome.confidence,
            findings: outcome.findings,
            metadata_analysis: outcome.metadata_analysis,
            assessment: VerificationAssessment::from_score(outcome.score),
            third_party_verification: None,
        }
    }

    /// Run the heuristics and, for text-like content, the attached claim verifier
    pub async fn verify(
        &self,
        content: &[u8],
        content_type: &str,
        metadata: &Metadata,
    ) -> VerificationResult {
        let mut result = self.evaluate(content, content_type, metadata);

        let Some(verifier) = self.claim_verifier.as_ref() else {
            return result;
        };
        if !Self::is_text_like(content_type) || !verifier.is_available() {
            return result;
        }

        let text = String::from_utf8_lossy(content);
        if text.trim().chars().count() <= CLAIM_MIN_CHARS {
            return result;
        }

        let claim: String = text.chars().take(CLAIM_MAX_CHARS).collect();
        match verifier.verify_claim(&claim, CLAIM_LANGUAGE).await {
            Ok(report) => result.third_party_verification = Some(report),
            Err(e) => {
                tracing::warn!("Third-party verification failed for {}: {}", result.content_id, e);
                result.findings.push(Finding::new(
                    "third_party_verification_error",
                    format!("Error during third-party verification: {}", e),
                    Severity::Low,
                ));
            }
        }

        result
    }

    fn verify_text(&self, content: &[u8], metadata: &Metadata) -> HandlerOutcome {
        let text = String::from_utf8_lossy(content);
        let mut outcome = HandlerOutcome::new(0.85, 0.9);

        for pattern in TEXT_PATTERNS.iter() {
            let matches = pattern.find_all(&text);
            if matches.is_empty() {
                continue;
            }
            let severity = if pattern.impact > 0.3 {
                Severity::Medium
            } else {
                Severity::Low
            };
            outcome.score -= pattern.penalty(matches.len(), TEXT_MATCH_CAP);
            outcome.findings.push(
                Finding::new(
                    pattern.label,
                    format!("Detected {} instances of {}", matches.len(), pattern.label),
                    severity,
                )
                .with_matches(matches),
            );
        }

        let word_count = text.split_whitespace().count();
        if word_count < 50 {
            outcome.findings.push(Finding::new(
                "insufficient_content",
                "Content too short for reliable verification",
                Severity::Low,
            ));
            outcome.confidence = 0.5;
        } else if word_count > 10_000 {
            outcome.findings.push(Finding::new(
                "excessive_content",
                "Content very long, analysis may be less precise",
                Severity::Low,
            ));
        }

        if !metadata.is_empty() {
            outcome.metadata_analysis =
                Some(MetadataAnalysis::Text(analyze_text_metadata(metadata)));
        }

        outcome.score = outcome.score.clamp(0.0, 1.0);
        outcome.confidence = outcome.confidence.max(0.1);
        tracing::debug!(
            "Text verification: {} words, score {:.2}",
            word_count,
            outcome.score
        );
        outcome
    }

    fn verify_html(&self, content: &[u8], metadata: &Metadata) -> HandlerOutcome {
        let html = String::from_utf8_lossy(content);
        let mut outcome = HandlerOutcome::new(0.8, 0.85);

        for pattern in HTML_PATTERNS.iter() {
            let count = pattern.regex.find_iter(&html).count();
            if count == 0 {
                continue;
            }
            let severity = if pattern.impact > 0.2 {
                Severity::Medium
            } else {
                Severity::Low
            };
            outcome.score -= pattern.penalty(count, HTML_MATCH_CAP);
            outcome.findings.push(
                Finding::new(
                    pattern.label,
                    format!("Detected {} instances of {}", count, pattern.label),
                    severity,
                )
                .with_count(count),
            );
        }

        let comment_count = html.matches("<!--").count();
        if comment_count > 10 && html.contains("-->") {
            outcome.findings.push(Finding::new(
                "excessive_comments",
                format!(
                    "Found {} HTML comments, possibly indicating content manipulation",
                    comment_count
                ),
                Severity::Medium,
            ));
            outcome.score -= 0.1;
        }

        if !metadata.is_empty() {
            outcome.metadata_analysis =
                Some(MetadataAnalysis::Text(analyze_text_metadata(metadata)));
        }

        outcome.score = outcome.score.clamp(0.0, 1.0);
        outcome
    }

    fn verify_image(&self, metadata: &Metadata) -> HandlerOutcome {
        let mut outcome = HandlerOutcome::new(0.75, 0.8);

        if !metadata.is_empty() {
            outcome.metadata_analysis =
                Some(MetadataAnalysis::Image(analyze_image_metadata(metadata)));

            let software = metadata
                .get("exif")
                .and_then(|exif| exif.get("Software"))
                .and_then(Value::as_str);
            if let Some(software) = software {
                let lowered = software.to_lowercase();
                if EDITING_TOOLS.iter().any(|tool| lowered.contains(tool)) {
                    outcome.findings.push(Finding::new(
                        "editing_software",
                        format!("Image edited with {}", software),
                        Severity::Low,
                    ));
                }
            }
        }

        outcome.findings.push(
            Finding::new(
                "image_verification",
                "Image verification requires specialized deepfake detection algorithms",
                Severity::Info,
            )
            .with_recommendation("Use deepfake detection for detailed image analysis"),
        );
        outcome
    }

    fn verify_video(&self, metadata: &Metadata) -> HandlerOutcome {
        let mut outcome = HandlerOutcome::new(0.7, 0.75);

        outcome.findings.push(
            Finding::new(
                "video_content",
                "Video verification requires specialized deepfake detection algorithms",
                Severity::Info,
            )
            .with_recommendation("Use deepfake detection module for detailed video analysis"),
        );

        if !metadata.is_empty() {
            outcome.metadata_analysis =
                Some(MetadataAnalysis::Video(analyze_video_metadata(metadata)));
        }
        outcome
    }

    fn verify_json(&self, content: &[u8], metadata: &Metadata) -> HandlerOutcome {
        let mut outcome = HandlerOutcome::new(0.9, 0.95);
        let text = String::from_utf8_lossy(content);

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(document)) => {
                if document.contains_key("source") || document.contains_key("origin") {
                    outcome.findings.push(Finding::new(
                        "source_attribution",
                        "Content includes source attribution information",
                        Severity::Positive,
                    ));
                    outcome.score += 0.1;
                }
                if JSON_TIMESTAMP_FIELDS
                    .iter()
                    .any(|field| document.contains_key(*field))
                {
                    outcome.findings.push(Finding::new(
                        "temporal_data",
                        "Content includes temporal information",
                        Severity::Positive,
                    ));
                    outcome.score += 0.05;
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Content is not valid JSON: {}", e);
                outcome.findings.push(Finding::new(
                    "invalid_json",
                    "Content is not valid JSON",
                    Severity::High,
                ));
                outcome.score = 0.1;
                outcome.confidence = 0.3;
            }
        }

        if !metadata.is_empty() {
            outcome.metadata_analysis =
                Some(MetadataAnalysis::Text(analyze_text_metadata(metadata)));
        }

        outcome.score = outcome.score.clamp(0.0, 1.0);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fact_check::models::{ClaimVerificationReport, ProviderOutcome};
    use crate::features::fact_check::FactCheckError;
    use async_trait::async_trait;
    use fake::faker::lorem::en::Words;
    use fake::Fake;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn no_metadata() -> Metadata {
        Metadata::new()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn kinds(result: &VerificationResult) -> Vec<&str> {
        result.findings.iter().map(|f| f.kind.as_str()).collect()
    }

    /// Neutral filler words that trigger none of the text patterns
    fn neutral_text(words: usize) -> String {
        vec!["river"; words].join(" ")
    }

    #[test]
    fn test_content_fingerprint() {
        let id = content_fingerprint(b"hello");
        assert_eq!(id, "2cf24dba5fb0a30e");
        assert_eq!(content_fingerprint(b"hello"), id);
        assert_ne!(content_fingerprint(b"hello!"), id);
    }

    #[test]
    fn test_clean_long_text_keeps_base_score() {
        let engine = ContentVerificationEngine::new();
        let result = engine.evaluate(neutral_text(60).as_bytes(), "text/plain", &no_metadata());

        assert!(approx(result.verification_score, 0.85));
        assert!(approx(result.confidence, 0.9));
        assert!(result.findings.is_empty());
        assert_eq!(result.assessment, VerificationAssessment::LikelyAuthentic);
        assert!(result.metadata_analysis.is_none());
    }

    #[test]
    fn test_sensational_short_text() {
        let engine = ContentVerificationEngine::new();
        let result = engine.evaluate(
            b"BREAKING NEWS: shocking discovery, everyone must read",
            "text/plain",
            &no_metadata(),
        );

        // sensational x2: 0.3 * 2/5, absolute x1: 0.35 * 1/5
        assert!(approx(result.verification_score, 0.85 - 0.12 - 0.07));
        assert!(approx(result.confidence, 0.5));

        let sensational = result
            .findings
            .iter()
            .find(|f| f.kind == "sensational_language")
            .unwrap();
        assert_eq!(sensational.count, Some(2));
        assert_eq!(sensational.severity, Severity::Low);

        let absolute = result
            .findings
            .iter()
            .find(|f| f.kind == "absolute_claims")
            .unwrap();
        assert_eq!(absolute.severity, Severity::Medium);
        assert!(kinds(&result).contains(&"insufficient_content"));
    }

    #[test]
    fn test_saturated_text_never_goes_negative() {
        let engine = ContentVerificationEngine::new();
        let text = "urgent alleged expert says nobody ".repeat(20);
        let result = engine.evaluate(text.as_bytes(), "text/plain", &no_metadata());

        assert_eq!(result.findings.len(), 4);
        assert!(approx(result.verification_score, 0.0));
        assert_eq!(result.assessment, VerificationAssessment::HighlySuspect);
    }

    #[test]
    fn test_excessive_text() {
        let engine = ContentVerificationEngine::new();
        let result = engine.evaluate(neutral_text(10_001).as_bytes(), "text/plain", &no_metadata());
        assert!(kinds(&result).contains(&"excessive_content"));
    }

    #[test]
    fn test_text_with_metadata() {
        let engine = ContentVerificationEngine::new();
        let metadata = json!({ "author": "A. Writer", "source": "wire" })
            .as_object()
            .cloned()
            .unwrap();
        let result = engine.evaluate(neutral_text(60).as_bytes(), "text/plain", &metadata);

        match result.metadata_analysis {
            Some(MetadataAnalysis::Text(analysis)) => {
                assert!(analysis.author_info.present);
                assert!(analysis.source_info.present);
            }
            other => panic!("unexpected metadata analysis: {:?}", other),
        }
    }

    #[test]
    fn test_html_scripts_and_handlers() {
        let engine = ContentVerificationEngine::new();
        let html = r#"<html><body onload="x()"><script>a()</script>
            <iframe src="ad"></iframe><meta http-equiv="refresh"></body></html>"#;
        let result = engine.evaluate(html.as_bytes(), "text/html", &no_metadata());

        let expected = 0.8 - 0.2 / 3.0 - 0.15 / 3.0 - 0.25 / 3.0 - 0.3 / 3.0;
        assert!(approx(result.verification_score, expected));
        assert!(approx(result.confidence, 0.85));

        let iframe = result
            .findings
            .iter()
            .find(|f| f.kind == "embedded_iframes")
            .unwrap();
        assert_eq!(iframe.severity, Severity::Medium);
        assert_eq!(iframe.count, Some(1));
        assert!(iframe.matches.is_none());
    }

    #[test]
    fn test_html_excessive_comments() {
        let engine = ContentVerificationEngine::new();
        let html = "<p>x</p><!-- c -->".repeat(11);
        let result = engine.evaluate(html.as_bytes(), "text/html", &no_metadata());

        assert!(kinds(&result).contains(&"excessive_comments"));
        assert!(approx(result.verification_score, 0.7));
    }

    #[test]
    fn test_image_editing_software() {
        let engine = ContentVerificationEngine::new();
        let metadata = json!({ "exif": { "Software": "Adobe Photoshop 2024" }, "width": 800 })
            .as_object()
            .cloned()
            .unwrap();
        let result = engine.evaluate(b"\xff\xd8\xff", "image/jpeg", &metadata);

        assert!(approx(result.verification_score, 0.75));
        assert_eq!(kinds(&result), vec!["editing_software", "image_verification"]);
        assert!(matches!(result.metadata_analysis, Some(MetadataAnalysis::Image(_))));
    }

    #[test]
    fn test_video_finding() {
        let engine = ContentVerificationEngine::new();
        let result = engine.evaluate(b"\x00\x00\x00\x18ftyp", "video/mp4", &no_metadata());

        assert!(approx(result.verification_score, 0.7));
        assert!(approx(result.confidence, 0.75));
        assert_eq!(result.findings[0].severity, Severity::Info);
        assert!(result.findings[0].recommendation.is_some());
    }

    #[test]
    fn test_json_attribution_and_time() {
        let engine = ContentVerificationEngine::new();
        let doc = br#"{"source": "agency", "timestamp": "2024-05-01", "body": "x"}"#;
        let result = engine.evaluate(doc, "application/json", &no_metadata());

        assert!(approx(result.verification_score, 1.0));
        assert_eq!(result.assessment, VerificationAssessment::HighlyAuthentic);
        assert_eq!(kinds(&result), vec!["source_attribution", "temporal_data"]);
    }

    #[test]
    fn test_invalid_json() {
        let engine = ContentVerificationEngine::new();
        let result = engine.evaluate(b"{not json", "application/json", &no_metadata());

        assert!(approx(result.verification_score, 0.1));
        assert!(approx(result.confidence, 0.3));
        assert_eq!(result.findings[0].severity, Severity::High);
    }

    #[test]
    fn test_unsupported_type() {
        let engine = ContentVerificationEngine::new();
        let result = engine.evaluate(b"%PDF-1.7", "application/pdf", &no_metadata());

        assert!(approx(result.verification_score, 0.1));
        assert!(approx(result.confidence, 0.1));
        assert_eq!(kinds(&result), vec!["unsupported_content_type"]);
        assert_eq!(result.assessment, VerificationAssessment::HighlySuspect);
    }

    #[test]
    fn test_scores_stay_in_range_for_random_text() {
        let engine = ContentVerificationEngine::new();
        for _ in 0..20 {
            let words: Vec<String> = Words(1..200).fake();
            let result = engine.evaluate(words.join(" ").as_bytes(), "text/plain", &no_metadata());
            assert!((0.0..=1.0).contains(&result.verification_score));
            assert!(result.confidence >= 0.1);
        }
    }

    struct RecordingVerifier {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ClaimVerifier for RecordingVerifier {
        fn is_available(&self) -> bool {
            true
        }

        async fn verify_claim(
            &self,
            claim: &str,
            _language: &str,
        ) -> Result<ClaimVerificationReport, FactCheckError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FactCheckError::EmptyClaim);
            }
            let mut results = BTreeMap::new();
            results.insert(
                "snopes".to_string(),
                ProviderOutcome::Verdict(json!({ "rating": "true" })),
            );
            Ok(ClaimVerificationReport {
                claim: claim.to_string(),
                results,
                timestamp: Utc::now(),
            })
        }
    }

    fn engine_with(fail: bool) -> (ContentVerificationEngine, Arc<RecordingVerifier>) {
        let verifier = Arc::new(RecordingVerifier {
            calls: AtomicUsize::new(0),
            fail,
        });
        (
            ContentVerificationEngine::with_claim_verifier(verifier.clone()),
            verifier,
        )
    }

    #[tokio::test]
    async fn test_claim_verifier_attached_for_text() {
        let (engine, verifier) = engine_with(false);
        let text = "x".repeat(800);
        let result = engine.verify(text.as_bytes(), "text/plain", &no_metadata()).await;

        let report = result.third_party_verification.unwrap();
        assert_eq!(report.claim.chars().count(), 500);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_claim_verifier_skipped_for_short_or_binary_content() {
        let (engine, verifier) = engine_with(false);

        let short = engine.verify(b"   tiny   ", "text/plain", &no_metadata()).await;
        assert!(short.third_party_verification.is_none());

        let image = engine
            .verify(b"long enough image bytes", "image/png", &no_metadata())
            .await;
        assert!(image.third_party_verification.is_none());

        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_claim_verifier_error_becomes_finding() {
        let (engine, _) = engine_with(true);
        let result = engine
            .verify(b"The election was held on Tuesday.", "text/plain", &no_metadata())
            .await;

        assert!(result.third_party_verification.is_none());
        let finding = result.findings.last().unwrap();
        assert_eq!(finding.kind, "third_party_verification_error");
        assert_eq!(finding.severity, Severity::Low);
    }
}
