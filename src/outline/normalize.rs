//! Heading text normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading or trailing runs of Unicode punctuation.
static EDGE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}+|\p{P}+$").unwrap());

/// Strip leading and trailing Unicode punctuation from heading text.
///
/// Interior punctuation and whitespace are preserved verbatim. Operates on
/// the Unicode punctuation category, not just ASCII, so em-dashes, CJK
/// brackets and the like are stripped without corrupting the rest of the
/// string.
pub fn strip_edge_punctuation(text: &str) -> String {
    EDGE_PUNCT.replace_all(text, "").into_owned()
}
