use lazy_static::lazy_static;
use regex::Regex;

use crate::features::content_analysis::models::{
    PatternHits, Readability, TextAnalysis, TextIndicators,
};

lazy_static! {
    static ref MISINFORMATION_PATTERNS: Vec<(&'static str, Regex)> = vec![
        (
            "sensational_language",
            Regex::new(r"(?i)\b(breaking news|urgent|shocking|unbelievable)\b").unwrap(),
        ),
        (
            "absolute_claims",
            Regex::new(r"(?i)\b(99%|100%|all|none|everyone|nobody|always|never)\b").unwrap(),
        ),
        (
            "vague_authority",
            Regex::new(r"(?i)\b(expert says|scientists agree|studies show)\b").unwrap(),
        ),
        (
            "fear_mongering",
            Regex::new(r"(?i)\b(warning|danger|threat|crisis|emergency)\b").unwrap(),
        ),
        (
            "conspiracy_indicators",
            Regex::new(r"(?i)\b(cover[-\s]up|hidden agenda|they don't want you to know)\b").unwrap(),
        ),
    ];

    static ref CREDIBILITY_PATTERNS: Vec<(&'static str, Regex)> = vec![
        (
            "source_attribution",
            Regex::new(r"(?i)\b(source:|according to|reported by|cited from)\b").unwrap(),
        ),
        (
            "evidence_indicators",
            Regex::new(r"(?i)\b(study|research|data|evidence|statistics)\b").unwrap(),
        ),
        (
            "temporal_indicators",
            Regex::new(r"(?i)\b(on [A-Z][a-z]+ \d+|in \d{4}|recently|currently)\b").unwrap(),
        ),
        (
            "balanced_language",
            Regex::new(r"(?i)\b(may|might|could|possibly|potentially)\b").unwrap(),
        ),
    ];

    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]+").unwrap();
}

const MISINFORMATION_WEIGHT: f64 = 0.1;
const CREDIBILITY_WEIGHT: f64 = 0.15;

fn collect_hits(patterns: &[(&'static str, Regex)], text: &str) -> Vec<PatternHits> {
    patterns
        .iter()
        .filter_map(|(label, regex)| {
            let matches: Vec<String> = regex
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect();
            (!matches.is_empty()).then(|| PatternHits {
                kind: label.to_string(),
                count: matches.len(),
                matches,
            })
        })
        .collect()
}

/// Pattern-based misinformation and credibility scoring for free text
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let misinformation = collect_hits(&MISINFORMATION_PATTERNS, text);
        let credibility = collect_hits(&CREDIBILITY_PATTERNS, text);

        let misinformation_matches: usize = misinformation.iter().map(|h| h.count).sum();
        let credibility_matches: usize = credibility.iter().map(|h| h.count).sum();

        let words: Vec<&str> = text.split_whitespace().collect();
        let sentences: Vec<&str> = SENTENCE_BOUNDARY
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .collect();

        let confidence = match words.len() {
            n if n < 20 => 0.3,
            n if n < 100 => 0.6,
            _ => 0.9,
        };

        TextAnalysis {
            misinformation_score: (misinformation_matches as f64 * MISINFORMATION_WEIGHT).min(1.0),
            credibility_score: (credibility_matches as f64 * CREDIBILITY_WEIGHT).min(1.0),
            indicators: TextIndicators {
                misinformation,
                credibility,
            },
            word_count: words.len(),
            sentence_count: sentences.len(),
            readability_metrics: readability(&words, sentences.len()),
            confidence,
        }
    }
}

fn readability(words: &[&str], sentence_count: usize) -> Readability {
    if words.is_empty() || sentence_count == 0 {
        return Readability::default();
    }

    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    Readability {
        avg_word_length: total_chars as f64 / words.len() as f64,
        avg_sentence_length: words.len() as f64 / sentence_count as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Sentences;
    use fake::Fake;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_misinformation_markers() {
        let analysis = TextAnalyzer::new().analyze(
            "Unbelievable! Scientists agree there is a cover-up. Nobody is safe from this crisis.",
        );

        let kinds: Vec<&str> = analysis
            .indicators
            .misinformation
            .iter()
            .map(|h| h.kind.as_str())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "sensational_language",
                "absolute_claims",
                "vague_authority",
                "fear_mongering",
                "conspiracy_indicators"
            ]
        );
        assert!(approx(analysis.misinformation_score, 0.5));
        assert!(approx(analysis.confidence, 0.3));
    }

    #[test]
    fn test_credibility_markers() {
        let analysis = TextAnalyzer::new()
            .analyze("According to the study published in 2021, the data may support this.");

        assert_eq!(analysis.indicators.credibility.len(), 4);
        // according to, study, data, in 2021, may
        assert!(approx(analysis.credibility_score, 0.75));
        assert!(analysis.indicators.misinformation.is_empty());
        assert!(approx(analysis.misinformation_score, 0.0));
    }

    #[test]
    fn test_scores_are_capped() {
        let text = "warning danger threat crisis emergency ".repeat(5);
        let analysis = TextAnalyzer::new().analyze(&text);
        assert!(approx(analysis.misinformation_score, 1.0));
        assert_eq!(analysis.indicators.misinformation[0].count, 25);
    }

    #[test]
    fn test_readability() {
        let analysis = TextAnalyzer::new().analyze("One two three. Four five!");

        assert_eq!(analysis.word_count, 5);
        assert_eq!(analysis.sentence_count, 2);
        assert!(approx(analysis.readability_metrics.avg_sentence_length, 2.5));
        assert!(approx(analysis.readability_metrics.avg_word_length, 21.0 / 5.0));
    }

    #[test]
    fn test_empty_text() {
        let analysis = TextAnalyzer::new().analyze("");

        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.sentence_count, 0);
        assert_eq!(analysis.readability_metrics, Readability::default());
        assert!(approx(analysis.confidence, 0.3));
    }

    #[test]
    fn test_confidence_grows_with_length() {
        let analyzer = TextAnalyzer::new();
        let medium = "word ".repeat(50);
        let long = "word ".repeat(150);

        assert!(approx(analyzer.analyze(&medium).confidence, 0.6));
        assert!(approx(analyzer.analyze(&long).confidence, 0.9));
    }

    #[test]
    fn test_generated_prose_stays_in_range() {
        let analyzer = TextAnalyzer::new();
        for _ in 0..10 {
            let text = Sentences(3..12).fake::<Vec<String>>().join(" ");
            let analysis = analyzer.analyze(&text);
            assert!((0.0..=1.0).contains(&analysis.misinformation_score));
            assert!((0.0..=1.0).contains(&analysis.credibility_score));
            assert!(analysis.sentence_count > 0);
        }
    }
}
