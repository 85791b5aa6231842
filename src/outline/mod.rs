//! Heading/outline inference engine.
//!
//! Turns the flat stream of positioned spans produced by the PDF backend
//! into a document title plus a hierarchical outline (H1–H3), using either
//! font-weight name heuristics or font-size ranking, with an optional
//! language-sensitive filter on size-ranked candidates.
//!
//! The pass is purely sequential and side-effect-free: given the same span
//! input it produces byte-identical output, and independent documents can
//! be processed concurrently with no shared state.

pub mod lang;
pub mod normalize;
pub mod span;
pub mod strategy;
pub mod title;

pub use lang::{has_english_cue, LanguageDetector, LanguageFilter, WhatlangDetector};
pub use normalize::strip_edge_punctuation;
pub use span::{Span, SpanSet};
pub use strategy::{
    ExtractedOutline, FontStrategy, FontThenSizeFallback, HeadingStrategy, SignalBucket,
    SignalKey, SizeStrategy, MAX_LEVELS, WEIGHT_TOKENS,
};
pub use title::{dedup_join, resolve_title};

use crate::parser::StrategyKind;

/// Runs the configured classification strategy over a span set.
pub struct OutlineExtractor {
    strategy: StrategyKind,
    language_filter: bool,
    detector: Box<dyn LanguageDetector>,
}

impl OutlineExtractor {
    /// Create an extractor for the given strategy with the default
    /// (whatlang) detector.
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            language_filter: false,
            detector: Box::new(WhatlangDetector::new()),
        }
    }

    /// Enable or disable the language-adaptive filter.
    ///
    /// The filter only ever applies to the pure size strategy; the font
    /// strategies ignore it, and the composite's size fallback runs
    /// unfiltered.
    pub fn with_language_filter(mut self, enabled: bool) -> Self {
        self.language_filter = enabled;
        self
    }

    /// Replace the language identification collaborator.
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Run the classification pass.
    pub fn extract(&self, set: &SpanSet) -> ExtractedOutline {
        match self.strategy {
            StrategyKind::Size => {
                let store;
                let filter = if self.language_filter {
                    store = LanguageFilter::new(self.detector.as_ref());
                    Some(&store)
                } else {
                    None
                };
                SizeStrategy.extract(set, filter)
            }
            StrategyKind::Font => FontStrategy.extract(set, None),
            StrategyKind::FontThenSize => FontThenSizeFallback::default().extract(set, None),
        }
    }
}
