use lazy_static::lazy_static;
use regex::Regex;

/// A weighted regex heuristic
pub struct ScoringPattern {
    pub label: &'static str,
    pub regex: Regex,
    /// Maximum amount subtracted from the score when the pattern saturates
    pub impact: f64,
}

impl ScoringPattern {
    fn new(label: &'static str, pattern: &str, impact: f64) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).unwrap(),
            impact,
        }
    }

    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Penalty for `count` matches, saturating at `cap` matches
    pub fn penalty(&self, count: usize, cap: usize) -> f64 {
        self.impact * count.min(cap) as f64 / cap as f64
    }
}

lazy_static! {
    /// Misinformation markers in plain text, saturating at five matches each
    pub static ref TEXT_PATTERNS: Vec<ScoringPattern> = vec![
        ScoringPattern::new(
            "sensational_language",
            r"(?i)\b(breaking news|urgent|shocking)\b",
            0.3,
        ),
        ScoringPattern::new(
            "uncertain_claims",
            r"(?i)\b(unconfirmed|alleged|reportedly)\b",
            0.2,
        ),
        ScoringPattern::new(
            "vague_authority",
            r"(?i)\b(expert says|scientists agree)\b",
            0.25,
        ),
        ScoringPattern::new(
            "absolute_claims",
            r"(?i)\b(99%|all|none|everyone|nobody)\b",
            0.35,
        ),
    ];

    /// Suspicious markup, saturating at three matches each
    pub static ref HTML_PATTERNS: Vec<ScoringPattern> = vec![
        ScoringPattern::new("embedded_scripts", r"(?is)<script[^>]*>.*?</script>", 0.2),
        ScoringPattern::new("inline_event_handlers", r"(?i)on\w+\s*=", 0.15),
        ScoringPattern::new("embedded_iframes", r"(?i)<iframe[^>]*>", 0.25),
        ScoringPattern::new("auto_refresh", r"(?i)<meta[^>]*refresh[^>]*>", 0.3),
    ];
}

pub const TEXT_MATCH_CAP: usize = 5;
pub const HTML_MATCH_CAP: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_patterns_are_case_insensitive_and_word_bounded() {
        let sensational = &TEXT_PATTERNS[0];
        assert_eq!(
            sensational.find_all("BREAKING NEWS: shocking details"),
            vec!["BREAKING NEWS", "shocking"]
        );
        assert!(sensational.find_all("urgently").is_empty());
    }

    #[test]
    fn test_penalty_saturates() {
        let absolute = &TEXT_PATTERNS[3];
        assert!((absolute.penalty(1, TEXT_MATCH_CAP) - 0.07).abs() < 1e-9);
        assert!((absolute.penalty(5, TEXT_MATCH_CAP) - 0.35).abs() < 1e-9);
        assert!((absolute.penalty(50, TEXT_MATCH_CAP) - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_script_pattern_spans_lines() {
        let scripts = &HTML_PATTERNS[0];
        let html = "<script type=\"text/javascript\">\nalert(1);\n</script><p>ok</p>";
        assert_eq!(scripts.find_all(html).len(), 1);
    }
}
