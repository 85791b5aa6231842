//! Link, annotation and image descriptor types.

use serde::{Deserialize, Serialize};

/// A link annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Page the link appears on (1-indexed)
    pub page: u32,

    /// Link rectangle (x0, y0, x1, y1) in page coordinates
    pub rect: [f32; 4],

    /// Target URI for external links
    pub uri: Option<String>,

    /// Target page for internal links (1-indexed)
    pub dest_page: Option<u32>,
}

/// A page annotation of any subtype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Page the annotation appears on (1-indexed)
    pub page: u32,

    /// Annotation subtype (e.g., "Link", "Text", "Highlight")
    pub subtype: String,

    /// Annotation rectangle (x0, y0, x1, y1)
    pub rect: [f32; 4],

    /// Annotation contents, if any
    pub contents: Option<String>,
}

/// Descriptor for an embedded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    /// Page the image appears on (1-indexed)
    pub page: u32,

    /// XObject resource name
    pub name: String,

    /// Image width in pixels
    pub width: Option<u32>,

    /// Image height in pixels
    pub height: Option<u32>,

    /// Color space name, if declared
    pub color_space: Option<String>,
}
