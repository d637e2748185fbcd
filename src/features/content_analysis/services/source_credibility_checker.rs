use crate::features::content_analysis::models::{SourceCategory, SourceCredibility};

const TRUSTED_DOMAINS: [(SourceCategory, &[&str]); 3] = [
    (
        SourceCategory::News,
        &[
            "reuters.com",
            "apnews.com",
            "bbc.com",
            "npr.org",
            "nytimes.com",
            "washingtonpost.com",
            "theguardian.com",
        ],
    ),
    (
        SourceCategory::Science,
        &[
            "nature.com",
            "science.org",
            "sciencemag.org",
            "scientificamerican.com",
            "pnas.org",
        ],
    ),
    (
        SourceCategory::FactChecking,
        &[
            "snopes.com",
            "factcheck.org",
            "politifact.com",
            "fullfact.org",
            "leadstories.com",
        ],
    ),
];

/// Lowercased host of `url` without scheme, path, credentials or port
pub fn extract_domain(url: &str) -> String {
    let lowered = url.trim().to_lowercase();
    let without_scheme = lowered
        .split_once("://")
        .map_or(lowered.as_str(), |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    host.split(':').next().unwrap_or_default().to_string()
}

fn matches_domain(domain: &str, trusted: &str) -> bool {
    domain == trusted || domain.ends_with(&format!(".{}", trusted))
}

/// Scores a URL against curated lists of trusted domains
#[derive(Debug, Clone, Default)]
pub struct SourceCredibilityChecker;

impl SourceCredibilityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, url: &str) -> SourceCredibility {
        let domain = extract_domain(url);

        let category = TRUSTED_DOMAINS.iter().find_map(|(category, domains)| {
            domains
                .iter()
                .any(|trusted| matches_domain(&domain, trusted))
                .then_some(*category)
        });

        let (credibility_score, notes) = match category {
            Some(category) => (
                0.9,
                vec![format!("Source is in trusted {} category", category.label())],
            ),
            None => (0.3, vec!["Source not in trusted domains list".to_string()]),
        };

        SourceCredibility {
            url: url.to_string(),
            domain,
            credibility_score,
            trusted_source: category.is_some(),
            source_category: category,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("https://www.BBC.com/news/world"), "www.bbc.com");
        assert_eq!(extract_domain("reuters.com"), "reuters.com");
        assert_eq!(extract_domain("http://user@nature.com:8080/x?y=1"), "nature.com");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn test_trusted_sources() {
        let checker = SourceCredibilityChecker::new();

        let news = checker.check("https://www.reuters.com/world/article");
        assert!(news.trusted_source);
        assert_eq!(news.source_category, Some(SourceCategory::News));
        assert_eq!(news.credibility_score, 0.9);

        let fact = checker.check("https://www.snopes.com/fact-check/x");
        assert_eq!(fact.source_category, Some(SourceCategory::FactChecking));
        assert_eq!(fact.notes, vec!["Source is in trusted fact_checking category"]);
    }

    #[test]
    fn test_untrusted_and_lookalike_sources() {
        let checker = SourceCredibilityChecker::new();

        let blog = checker.check("https://random-blog.example/post");
        assert!(!blog.trusted_source);
        assert_eq!(blog.credibility_score, 0.3);
        assert_eq!(blog.source_category, None);

        let lookalike = checker.check("https://notreuters.com/story");
        assert!(!lookalike.trusted_source);
    }
}
