//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Annotation, ImageRef, Link, OutlineEntry, PageContent, Table};

/// Structured content extracted from one PDF document.
///
/// This is the per-document JSON artifact. `title` and `outline` are
/// produced by the heading inference core; the remaining fields are filled
/// by collaborator pass-throughs and never touched by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Resolved document title (never empty)
    pub title: String,

    /// Inferred heading outline, in document scan order
    pub outline: Vec<OutlineEntry>,

    /// Document metadata (Info dictionary)
    pub metadata: Metadata,

    /// Per-page plain text
    pub pages: Vec<PageContent>,

    /// Detected tables
    pub tables: Vec<Table>,

    /// Embedded image descriptors
    pub images: Vec<ImageRef>,

    /// Link annotations
    pub links: Vec<Link>,

    /// All annotations
    pub annotations: Vec<Annotation>,
}

impl DocumentContent {
    /// Create empty content with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
            metadata: Metadata::default(),
            pages: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the document yielded any content at all.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty() && self.pages.iter().all(|p| p.text.trim().is_empty())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title from the Info dictionary
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }

    /// Title field, trimmed, if non-empty.
    pub fn trimmed_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
