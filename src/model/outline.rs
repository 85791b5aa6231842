//! Outline entry types.

use serde::{Deserialize, Serialize};

/// Heading level of an outline entry.
///
/// Only three levels are ever produced; signal buckets beyond rank 2 are
/// discarded during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a 0-based signal bucket rank to a level. Ranks ≥ 3 have no level.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    /// Numeric depth (1 for H1).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// One accepted heading in the document outline.
///
/// Serializes as `{"level": "H<N>", "text": "<string>", "page": <int>}`.
/// Entries appear in document scan order and are never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level (H1–H3)
    pub level: HeadingLevel,

    /// Normalized heading text
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(0), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_rank(2), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_rank(3), None);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = OutlineEntry::new(HeadingLevel::H2, "Background", 4);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"H2","text":"Background","page":4}"#);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(HeadingLevel::H1.to_string(), "H1");
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
    }
}
