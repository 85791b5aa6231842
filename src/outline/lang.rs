//! Language-adaptive heading filter.
//!
//! English headings usually carry an enumeration prefix or end in a colon;
//! headings in other scripts are accepted on size evidence alone because
//! such lexical cues are unreliable cross-lingually. Identification runs
//! behind the [`LanguageDetector`] trait so the concrete engine stays
//! swappable and test doubles stay trivial.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading ordinal/numeral pattern for English headings ("1.", "IV)", ...).
static NUMERIC_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9IVX]+[.|)]+").unwrap());

/// Best-effort language identification.
///
/// Returns an ISO 639 code on success, `None` on failure. Failure is
/// always recoverable: the caller treats unidentifiable text as English,
/// the stricter branch.
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `text`.
    fn detect(&self, text: &str) -> Option<String>;
}

/// [`LanguageDetector`] backed by whatlang.
///
/// whatlang is deterministic by construction, so reproducibility needs no
/// seed; the optional allowlist is the only configuration and is fixed at
/// construction time.
#[derive(Debug, Clone, Default)]
pub struct WhatlangDetector {
    allowlist: Option<Vec<whatlang::Lang>>,
}

impl WhatlangDetector {
    /// Create a detector considering all supported languages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector restricted to the given languages.
    pub fn with_allowlist(langs: Vec<whatlang::Lang>) -> Self {
        Self {
            allowlist: Some(langs),
        }
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = match &self.allowlist {
            Some(langs) => whatlang::Detector::with_allowlist(langs.clone()).detect(text)?,
            None => whatlang::detect(text)?,
        };
        Some(info.lang().code().to_string())
    }
}

/// The language-conditional acceptance rule for size-ranked candidates.
pub struct LanguageFilter<'a> {
    detector: &'a dyn LanguageDetector,
}

impl<'a> LanguageFilter<'a> {
    /// Create a filter over the given detector.
    pub fn new(detector: &'a dyn LanguageDetector) -> Self {
        Self { detector }
    }

    /// Whether a heading candidate passes the filter.
    ///
    /// English text must match the numeral prefix or end with a colon;
    /// text detected as any other language passes unconditionally.
    /// Identification failure counts as English.
    pub fn admits(&self, text: &str) -> bool {
        let english = match self.detector.detect(text) {
            Some(code) => code.starts_with("en"),
            None => true,
        };

        if !english {
            return true;
        }

        has_english_cue(text)
    }
}

/// English heading cue: enumeration prefix or trailing colon.
pub fn has_english_cue(text: &str) -> bool {
    NUMERIC_CUE.is_match(text) || text.ends_with(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Detector returning a fixed code.
    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_english_without_cue_rejected() {
        let detector = FixedDetector(Some("eng"));
        let filter = LanguageFilter::new(&detector);
        assert!(!filter.admits("Results"));
    }

    #[test]
    fn test_english_with_numeral_accepted() {
        let detector = FixedDetector(Some("eng"));
        let filter = LanguageFilter::new(&detector);
        assert!(filter.admits("1. Results"));
        assert!(filter.admits("IV) Discussion"));
    }

    #[test]
    fn test_english_with_colon_accepted() {
        let detector = FixedDetector(Some("eng"));
        let filter = LanguageFilter::new(&detector);
        assert!(filter.admits("Results:"));
    }

    #[test]
    fn test_non_english_accepted_without_cue() {
        let detector = FixedDetector(Some("cmn"));
        let filter = LanguageFilter::new(&detector);
        assert!(filter.admits("結果"));
    }

    #[test]
    fn test_detection_failure_treated_as_english() {
        let detector = FixedDetector(None);
        let filter = LanguageFilter::new(&detector);
        assert!(!filter.admits("Results"));
        assert!(filter.admits("2) Results"));
    }

    #[test]
    fn test_english_cue_patterns() {
        assert!(has_english_cue("1. Introduction"));
        assert!(has_english_cue("12) Appendix"));
        assert!(has_english_cue("IX. History"));
        assert!(has_english_cue("Methods:"));
        assert!(!has_english_cue("Introduction"));
        assert!(!has_english_cue("Chapter 1"));
    }

    #[test]
    fn test_whatlang_detects_english() {
        let detector = WhatlangDetector::new();
        let code = detector
            .detect("The quick brown fox jumps over the lazy dog and keeps running")
            .expect("detection should succeed on clear English prose");
        assert!(code.starts_with("en"));
    }

    #[test]
    fn test_whatlang_fails_on_empty_input() {
        let detector = WhatlangDetector::new();
        assert!(detector.detect("").is_none());
    }
}
