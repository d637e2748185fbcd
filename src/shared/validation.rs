use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for model type identifiers
    /// Must be lowercase snake_case
    /// - Valid: "text_analysis", "image_analysis", "ocr"
    /// - Invalid: "Text", "text-analysis", "_text", "text_"
    pub static ref MODEL_TYPE_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9]*(?:_[a-z0-9]+)*$").unwrap();

    /// Regex for model versions (semantic versioning, optional pre-release tag)
    /// - Valid: "1.0.0", "2.10.3", "1.1.0-beta"
    /// - Invalid: "1.0", "v1.0.0", "1.0.0."
    pub static ref MODEL_VERSION_REGEX: Regex =
        Regex::new(r"^\d+\.\d+\.\d+(?:-[0-9A-Za-z.]+)?$").unwrap();

    /// Regex for language codes accepted by fact-check providers (ISO 639-1, optional region)
    pub static ref LANGUAGE_CODE_REGEX: Regex = Regex::new(r"^[a-z]{2}(?:-[A-Z]{2})?$").unwrap();
}
