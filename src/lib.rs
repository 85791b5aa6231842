//! # outpdf
//!
//! Structure-aware PDF content extraction for Rust.
//!
//! This library extracts a document title, a heuristic heading outline
//! (H1–H3), page text, tables, image descriptors and link/annotation data
//! from PDF documents, and serializes the result as one JSON artifact per
//! document. Headings are inferred from font evidence — weight-name
//! matching and size ranking — so documents without embedded bookmarks
//! still produce a usable outline.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outpdf::{extract_file, render, JsonFormat};
//!
//! fn main() -> outpdf::Result<()> {
//!     let content = extract_file("document.pdf")?;
//!     println!("{}", content.title);
//!     for entry in &content.outline {
//!         println!("{} {} (p.{})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&content, JsonFormat::Pretty)?;
//!     std::fs::write("document.json", json)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! ```no_run
//! use outpdf::{process_dir, ExtractOptions};
//!
//!
//! let summary = process_dir("input_pdfs", "processed", &ExtractOptions::default())?;
//! println!("{} processed, {} failed", summary.processed_count(), summary.failed_count());
//! # Ok::<(), outpdf::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Heading inference without bookmarks**: font-weight and font-size
//!   signal strategies with an explicit fallback chain
//! - **Language-adaptive filtering**: English headings must look like
//!   headings; other scripts are accepted on size evidence alone
//! - **Collaborator pass-throughs**: metadata, page text, tables, images,
//!   links and annotations alongside the outline
//! - **Parallel batch runs**: one worker per document, per-document
//!   failure isolation

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{process_dir, BatchSummary};
pub use error::{Error, Result};
pub use model::{
    Annotation, DocumentContent, HeadingLevel, ImageRef, Link, Metadata, OutlineEntry,
    PageContent, Table,
};
pub use outline::{
    ExtractedOutline, LanguageDetector, OutlineExtractor, SpanSet, WhatlangDetector,
};
pub use parser::{ExtractOptions, LopdfBackend, PageSource, StrategyKind};
pub use render::JsonFormat;

use std::path::Path;

use parser::backend::RawPage;
use parser::TableDetector;

/// Extract structured content from a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use outpdf::extract_file;
///
/// let content = extract_file("document.pdf").unwrap();
/// println!("{} outline entries", content.outline.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentContent> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract structured content from a PDF file with custom options.
///
/// The file stem serves as the last-resort title unless the options carry
/// an explicit fallback.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<DocumentContent> {
    let path = path.as_ref();
    detect::detect_format_from_path(path)?;

    let backend = LopdfBackend::load_file(path)?;
    let fallback_title = options.fallback_title.clone().unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    });

    run_extraction(&backend, &options, None, &fallback_title)
}

/// Extract structured content from in-memory PDF bytes.
pub fn extract_bytes(data: &[u8]) -> Result<DocumentContent> {
    extract_bytes_with_options(data, ExtractOptions::default())
}

/// Extract structured content from in-memory PDF bytes with custom options.
pub fn extract_bytes_with_options(
    data: &[u8],
    options: ExtractOptions,
) -> Result<DocumentContent> {
    detect::detect_format_from_bytes(data)?;

    let backend = LopdfBackend::load_bytes(data)?;
    let fallback_title = options
        .fallback_title
        .clone()
        .unwrap_or_else(|| "document".to_string());

    run_extraction(&backend, &options, None, &fallback_title)
}

/// The per-document pipeline: decode pages, collect spans, classify,
/// resolve the title, then fill the collaborator siblings.
fn run_extraction(
    backend: &LopdfBackend,
    options: &ExtractOptions,
    detector: Option<Box<dyn LanguageDetector>>,
    fallback_title: &str,
) -> Result<DocumentContent> {
    let metadata = backend.metadata();
    let page_count = backend.page_count();

    // Page decode failures degrade to empty pages; they never abort the
    // document.
    let mut raw_pages: Vec<RawPage> = Vec::with_capacity(page_count as usize);
    for number in 1..=page_count {
        match backend.page(number) {
            Ok(page) => raw_pages.push(page),
            Err(e) => {
                log::warn!("Failed to decode page {}: {}", number, e);
                raw_pages.push(RawPage {
                    number,
                    width: 612.0,
                    height: 792.0,
                    lines: Vec::new(),
                });
            }
        }
    }

    let set = SpanSet::collect(&raw_pages);

    let mut extractor =
        OutlineExtractor::new(options.strategy).with_language_filter(options.language_filter);
    if let Some(detector) = detector {
        extractor = extractor.with_detector(detector);
    }
    let extracted = extractor.extract(&set);

    let title = outline::resolve_title(extracted.title, metadata.trimmed_title(), fallback_title);

    let pages: Vec<PageContent> = raw_pages
        .iter()
        .map(|p| PageContent::new(p.number, p.width, p.height, p.plain_text()))
        .collect();

    let tables = if options.extract_tables {
        let detector = TableDetector::new();
        raw_pages.iter().flat_map(|p| detector.detect(p)).collect()
    } else {
        Vec::new()
    };

    let mut links = Vec::new();
    let mut annotations = Vec::new();
    if options.extract_annotations {
        for number in 1..=page_count {
            match backend.page_annotations(number) {
                Ok((mut page_links, mut page_annots)) => {
                    links.append(&mut page_links);
                    annotations.append(&mut page_annots);
                }
                Err(e) => log::warn!("Failed to read annotations on page {}: {}", number, e),
            }
        }
    }

    let mut images = Vec::new();
    if options.extract_images {
        for number in 1..=page_count {
            match backend.page_images(number) {
                Ok(mut page_images) => images.append(&mut page_images),
                Err(e) => log::warn!("Failed to list images on page {}: {}", number, e),
            }
        }
    }

    Ok(DocumentContent {
        title,
        outline: extracted.entries,
        metadata,
        pages,
        tables,
        images,
        links,
        annotations,
    })
}

/// Builder for configuring and running extraction.
///
/// # Example
///
/// ```no_run
/// use outpdf::Outpdf;
///
/// let content = Outpdf::new()
///     .size_strategy()
///     .with_language_filter(true)
///     .extract("document.pdf")?;
/// # Ok::<(), outpdf::Error>(())
/// ```
pub struct Outpdf {
    options: ExtractOptions,
    detector: Option<Box<dyn LanguageDetector>>,
}

impl Outpdf {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            detector: None,
        }
    }

    /// Use the size-ranking strategy.
    pub fn size_strategy(mut self) -> Self {
        self.options = self.options.size_strategy();
        self
    }

    /// Use the font-weight strategy (no fallback).
    pub fn font_strategy(mut self) -> Self {
        self.options = self.options.font_strategy();
        self
    }

    /// Set the heading strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.options = self.options.with_strategy(strategy);
        self
    }

    /// Enable or disable the language-adaptive filter.
    pub fn with_language_filter(mut self, enabled: bool) -> Self {
        self.options = self.options.with_language_filter(enabled);
        self
    }

    /// Replace the language identification collaborator.
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, extract: bool) -> Self {
        self.options = self.options.with_tables(extract);
        self
    }

    /// Enable or disable image listing.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.options = self.options.with_images(extract);
        self
    }

    /// Enable or disable link/annotation enumeration.
    pub fn with_annotations(mut self, extract: bool) -> Self {
        self.options = self.options.with_annotations(extract);
        self
    }

    /// Set the last-resort title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_fallback_title(title);
        self
    }

    /// Extract from a PDF file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<DocumentContent> {
        let path = path.as_ref();
        detect::detect_format_from_path(path)?;

        let backend = LopdfBackend::load_file(path)?;
        let fallback_title = self.options.fallback_title.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string())
        });

        run_extraction(&backend, &self.options, self.detector, &fallback_title)
    }

    /// Extract from in-memory PDF bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<DocumentContent> {
        detect::detect_format_from_bytes(data)?;

        let backend = LopdfBackend::load_bytes(data)?;
        let fallback_title = self
            .options
            .fallback_title
            .clone()
            .unwrap_or_else(|| "document".to_string());

        run_extraction(&backend, &self.options, self.detector, &fallback_title)
    }
}

impl Default for Outpdf {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_options() {
        let builder = Outpdf::new()
            .size_strategy()
            .with_language_filter(true)
            .sequential()
            .with_tables(false);

        assert_eq!(builder.options.strategy, StrategyKind::Size);
        assert!(builder.options.language_filter);
        assert!(!builder.options.parallel);
        assert!(!builder.options.extract_tables);
    }

    #[test]
    fn test_extract_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(extract_bytes(&data).is_err());
    }

    #[test]
    fn test_extract_bytes_unknown_magic() {
        let data = b"<!DOCTYPE html><html></html>";
        let result = extract_bytes(data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_bytes_truncated_pdf() {
        // Valid header but no document body
        let data = b"%PDF-1.7\n%broken";
        assert!(extract_bytes(data).is_err());
    }

    #[test]
    fn test_extract_missing_file() {
        let result = extract_file("definitely/not/a/file.pdf");
        assert!(result.is_err());
    }
}
