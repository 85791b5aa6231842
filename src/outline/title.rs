//! Document title resolution.

use std::collections::HashSet;

/// Join lines with single spaces, collapsing exact duplicates while
/// preserving first-seen order. Returns `None` for an empty slice.
pub fn dedup_join(lines: &[&str]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }

    let mut seen = HashSet::new();
    let parts: Vec<&str> = lines.iter().copied().filter(|l| seen.insert(*l)).collect();
    Some(parts.join(" "))
}

/// Resolve the document title.
///
/// Priority: the classification pass's derived title, then the metadata
/// title (trimmed, non-empty), then the unconditional fallback (file stem).
/// Never fails.
pub fn resolve_title(
    derived: Option<String>,
    metadata_title: Option<&str>,
    fallback: &str,
) -> String {
    if let Some(title) = derived {
        if !title.is_empty() {
            return title;
        }
    }

    if let Some(title) = metadata_title {
        let title = title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    fallback.to_string()
}
