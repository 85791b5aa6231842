//! Extraction options and configuration.

/// Heading signal strategy selection.
///
/// `FontThenSize` is the composite: a font-weight pass first, with an
/// unconditional size-ranking fallback when that pass yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Rank heading candidates by font size alone
    Size,
    /// Rank heading candidates by font-weight name matching
    Font,
    /// Font pass with size-ranking fallback
    #[default]
    FontThenSize,
}

/// Options for document content extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Which heading signal strategy to run
    pub strategy: StrategyKind,

    /// Apply the language-adaptive heading filter (size strategy only)
    pub language_filter: bool,

    /// Whether batch processing may use the thread pool
    pub parallel: bool,

    /// Whether to run positional table detection
    pub extract_tables: bool,

    /// Whether to list embedded images
    pub extract_images: bool,

    /// Whether to enumerate links and annotations
    pub extract_annotations: bool,

    /// Last-resort title when no file name is available
    pub fallback_title: Option<String>,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use the size-ranking strategy.
    pub fn size_strategy(mut self) -> Self {
        self.strategy = StrategyKind::Size;
        self
    }

    /// Use the font-weight strategy (no fallback).
    pub fn font_strategy(mut self) -> Self {
        self.strategy = StrategyKind::Font;
        self
    }

    /// Enable or disable the language-adaptive filter.
    pub fn with_language_filter(mut self, enabled: bool) -> Self {
        self.language_filter = enabled;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, extract: bool) -> Self {
        self.extract_tables = extract;
        self
    }

    /// Enable or disable image listing.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable link/annotation enumeration.
    pub fn with_annotations(mut self, extract: bool) -> Self {
        self.extract_annotations = extract;
        self
    }

    /// Set the last-resort title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = Some(title.into());
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            language_filter: false,
            parallel: true,
            extract_tables: true,
            extract_images: true,
            extract_annotations: true,
            fallback_title: None,
        }
    }
}
