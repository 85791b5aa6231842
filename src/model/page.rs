//! Page-level types.

use serde::{Deserialize, Serialize};

/// Plain text content of a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Extracted text, lines joined with newlines
    pub text: String,
}

impl PageContent {
    /// Create a new page with the given dimensions and text.
    pub fn new(number: u32, width: f32, height: f32, text: impl Into<String>) -> Self {
        Self {
            number,
            width,
            height,
            text: text.into(),
        }
    }

    /// Check if the page has no text content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_content() {
        let page = PageContent::new(1, 612.0, 792.0, "Hello");
        assert_eq!(page.number, 1);
        assert!(!page.is_empty());

        let blank = PageContent::new(2, 612.0, 792.0, "  \n ");
        assert!(blank.is_empty());
    }
}
