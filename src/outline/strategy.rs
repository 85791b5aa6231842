//! Heading signal selection and outline assembly.
//!
//! Two independent signal sources classify spans as headings: font-weight
//! name matching and font-size ranking. Each is a [`HeadingStrategy`]; the
//! [`FontThenSizeFallback`] composite chains them, running the size pass
//! only when the font pass produces nothing.

use crate::model::{HeadingLevel, OutlineEntry};

use super::lang::LanguageFilter;
use super::normalize::strip_edge_punctuation;
use super::span::{Span, SpanSet};
use super::title::dedup_join;

/// Maximum number of retained signal buckets (H1–H3).
pub const MAX_LEVELS: usize = 3;

/// Font names containing any of these tokens (lowercased) are treated as
/// heading-weight fonts.
pub const WEIGHT_TOKENS: [&str; 4] = ["bold", "black", "heavy", "medium"];

/// Heading candidates longer than this are treated as body paragraph
/// leakage in the font pass.
const MAX_HEADING_CHARS: usize = 100;

/// Minimum line width relative to page width for font-pass candidates.
const MIN_WIDTH_RATIO: f32 = 0.5;

/// A ranked classification key considered heading-worthy.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBucket {
    /// The classification key
    pub key: SignalKey,
    /// 0-based rank; rank 0 maps to H1
    pub rank: usize,
    /// Frequency used for ranking: word count (size) or run count (font)
    pub members: usize,
}

/// A signal bucket key: a rounded font size or a font name.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalKey {
    /// Font size in tenths of a point
    Size(i32),
    /// Font name
    Font(String),
}

/// Result of one classification pass.
#[derive(Debug, Clone, Default)]
pub struct ExtractedOutline {
    /// Pass-derived title, if the pass produced one
    pub title: Option<String>,
    /// Accepted entries in document scan order
    pub entries: Vec<OutlineEntry>,
}

impl ExtractedOutline {
    /// A pass that produced nothing.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A heading classification strategy.
///
/// `extract` runs the full pass: bucket selection over the span set, then
/// per-span level assignment, title derivation and text normalization.
pub trait HeadingStrategy {
    /// Strategy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Run the classification pass.
    fn extract(&self, set: &SpanSet, filter: Option<&LanguageFilter<'_>>) -> ExtractedOutline;
}

// ---------------------------------------------------------------------------
// Size strategy
// ---------------------------------------------------------------------------

/// Ranks heading candidates purely by font size.
///
/// The size carrying the most words is taken to be body text and removed
/// outright; the largest three surviving sizes become H1–H3.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeStrategy;

impl SizeStrategy {
    /// Select up to three signal buckets, largest size first.
    pub fn select_buckets(&self, set: &SpanSet) -> Vec<SignalBucket> {
        let hist = set.size_words();
        if hist.is_empty() {
            return Vec::new();
        }

        // Body size: maximum aggregate word count. Strictly-greater
        // comparison keeps the first-seen size on ties.
        let mut body_key = 0;
        let mut body_words = 0;
        for (key, words) in hist {
            if *words > body_words {
                body_words = *words;
                body_key = *key;
            }
        }

        let mut sizes: Vec<(i32, usize)> = hist
            .iter()
            .filter(|(key, _)| **key != body_key)
            .map(|(key, words)| (*key, *words))
            .collect();
        sizes.sort_by(|a, b| b.0.cmp(&a.0));
        sizes.truncate(MAX_LEVELS);

        sizes
            .into_iter()
            .enumerate()
            .map(|(rank, (key, members))| SignalBucket {
                key: SignalKey::Size(key),
                rank,
                members,
            })
            .collect()
    }

    fn rank_of(buckets: &[SignalBucket], key: i32) -> Option<usize> {
        buckets
            .iter()
            .find(|b| b.key == SignalKey::Size(key))
            .map(|b| b.rank)
    }
}

impl HeadingStrategy for SizeStrategy {
    fn name(&self) -> &'static str {
        "size"
    }

    fn extract(&self, set: &SpanSet, filter: Option<&LanguageFilter<'_>>) -> ExtractedOutline {
        let buckets = self.select_buckets(set);
        let Some(SignalKey::Size(h1_key)) = buckets.first().map(|b| b.key.clone()) else {
            return ExtractedOutline::empty();
        };

        // Page-1 lines at the H1 size become the title; they are excluded
        // from the outline so the title is not duplicated inside it.
        let title_lines: Vec<&str> = set
            .spans()
            .iter()
            .filter(|s| s.page == 1 && s.size_key() == h1_key)
            .map(|s| s.text.as_str())
            .collect();
        let title = dedup_join(&title_lines);

        let mut entries = Vec::new();
        for span in set.spans() {
            let Some(rank) = Self::rank_of(&buckets, span.size_key()) else {
                continue;
            };
            let Some(level) = HeadingLevel::from_rank(rank) else {
                continue;
            };
            if rank == 0 && span.page == 1 && title_lines.contains(&span.text.as_str()) {
                continue;
            }
            if let Some(filter) = filter {
                if !filter.admits(&span.text) {
                    continue;
                }
            }
            entries.push(OutlineEntry::new(
                level,
                strip_edge_punctuation(&span.text),
                span.page,
            ));
        }

        ExtractedOutline { title, entries }
    }
}

// ---------------------------------------------------------------------------
// Font strategy
// ---------------------------------------------------------------------------

/// Ranks heading candidates by font-weight name matching.
///
/// Only fonts whose lowercased name carries a weight token are considered;
/// the three most used become H1–H3. Candidates must be single-run lines,
/// at least half the page wide and at most 100 characters long.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontStrategy;

impl FontStrategy {
    /// Select up to three signal buckets, most used font first.
    pub fn select_buckets(&self, set: &SpanSet) -> Vec<SignalBucket> {
        let mut fonts: Vec<(String, usize)> = set
            .font_spans()
            .iter()
            .filter(|(name, _)| is_heading_weight(name))
            .map(|(name, count)| (name.clone(), *count))
            .collect();

        // Stable sort keeps first-seen order on equal counts
        fonts.sort_by(|a, b| b.1.cmp(&a.1));
        fonts.truncate(MAX_LEVELS);

        fonts
            .into_iter()
            .enumerate()
            .map(|(rank, (name, members))| SignalBucket {
                key: SignalKey::Font(name),
                rank,
                members,
            })
            .collect()
    }

    fn rank_of(buckets: &[SignalBucket], name: &str) -> Option<usize> {
        buckets
            .iter()
            .find(|b| matches!(&b.key, SignalKey::Font(f) if f == name))
            .map(|b| b.rank)
    }

    fn accepts(&self, span: &Span, page_width: f32) -> bool {
        span.span_count == 1
            && span.bbox.width() >= page_width * MIN_WIDTH_RATIO
            && span.text.chars().count() <= MAX_HEADING_CHARS
    }
}

impl HeadingStrategy for FontStrategy {
    fn name(&self) -> &'static str {
        "font"
    }

    fn extract(&self, set: &SpanSet, _filter: Option<&LanguageFilter<'_>>) -> ExtractedOutline {
        let buckets = self.select_buckets(set);
        if buckets.is_empty() {
            return ExtractedOutline::empty();
        }

        let mut title = None;
        let mut entries = Vec::new();

        for span in set.spans() {
            let Some(rank) = Self::rank_of(&buckets, &span.font_name) else {
                continue;
            };
            let Some(level) = HeadingLevel::from_rank(rank) else {
                continue;
            };
            if !self.accepts(span, set.page_width(span.page)) {
                continue;
            }

            let entry = OutlineEntry::new(level, strip_edge_punctuation(&span.text), span.page);
            if title.is_none() && rank == 0 && span.page == 1 {
                title = Some(entry.text.clone());
            }
            entries.push(entry);
        }

        ExtractedOutline { title, entries }
    }
}

/// Check a font name for a heading weight token.
pub fn is_heading_weight(name: &str) -> bool {
    let lower = name.to_lowercase();
    WEIGHT_TOKENS.iter().any(|token| lower.contains(token))
}

// ---------------------------------------------------------------------------
// Composite: font pass with size fallback
// ---------------------------------------------------------------------------

/// Font pass first; when it yields zero entries, an unconditional size pass
/// runs over the full span set. The fallback never applies the language
/// filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontThenSizeFallback {
    font: FontStrategy,
    size: SizeStrategy,
}

impl HeadingStrategy for FontThenSizeFallback {
    fn name(&self) -> &'static str {
        "font-then-size"
    }

    fn extract(&self, set: &SpanSet, _filter: Option<&LanguageFilter<'_>>) -> ExtractedOutline {
        let primary = self.font.extract(set, None);
        if !primary.entries.is_empty() {
            return primary;
        }

        log::debug!("font pass produced no entries, falling back to size ranking");
        self.size.extract(set, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::backend::{BBox, RawLine, RawPage, RawSpan};

    fn run(text: &str, font: &str, size: f32, width: f32) -> RawSpan {
        RawSpan {
            text: text.to_string(),
            font_name: font.to_string(),
            font_size: size,
            bbox: BBox::new(50.0, 700.0, 50.0 + width, 700.0 + size),
        }
    }

    fn one_run_line(text: &str, font: &str, size: f32, width: f32) -> RawLine {
        RawLine {
            spans: vec![run(text, font, size, width)],
        }
    }

    fn page(number: u32, lines: Vec<RawLine>) -> RawPage {
        RawPage {
            number,
            width: 612.0,
            height: 792.0,
            lines,
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_size_buckets_exclude_body() {
        // 12pt carries 500 words, 18pt 40, 24pt 10
        let pages = vec![page(
            1,
            vec![
                one_run_line(&words(500), "Helvetica", 12.0, 400.0),
                one_run_line(&words(40), "Helvetica", 18.0, 400.0),
                one_run_line(&words(10), "Helvetica", 24.0, 400.0),
            ],
        )];
        let set = SpanSet::collect(&pages);

        let buckets = SizeStrategy.select_buckets(&set);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, SignalKey::Size(240));
        assert_eq!(buckets[0].rank, 0);
        assert_eq!(buckets[1].key, SignalKey::Size(180));
        assert_eq!(buckets[1].rank, 1);
    }

    #[test]
    fn test_size_buckets_empty_when_body_is_only_size() {
        let pages = vec![page(1, vec![one_run_line(&words(50), "Helvetica", 12.0, 400.0)])];
        let set = SpanSet::collect(&pages);

        assert!(SizeStrategy.select_buckets(&set).is_empty());
        let outline = SizeStrategy.extract(&set, None);
        assert!(outline.title.is_none());
        assert!(outline.entries.is_empty());
    }

    #[test]
    fn test_size_tie_break_keeps_first_seen() {
        // 14pt and 16pt both carry 3 words; 12pt is body. 14pt is seen
        // first, so on a word-count tie it must stay ahead in the
        // histogram — ranking is by size value, but the body choice below
        // exercises the strictly-greater rule.
        let pages = vec![page(
            1,
            vec![
                one_run_line(&words(3), "Helvetica", 14.0, 400.0),
                one_run_line(&words(3), "Helvetica", 16.0, 400.0),
            ],
        )];
        let set = SpanSet::collect(&pages);

        // Tie at 3 words: first-seen (14pt) is the body size
        let buckets = SizeStrategy.select_buckets(&set);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, SignalKey::Size(160));
    }

    #[test]
    fn test_size_level_cap_at_h3() {
        let pages = vec![page(
            1,
            vec![
                one_run_line(&words(100), "Helvetica", 10.0, 400.0), // body
                one_run_line("A", "Helvetica", 30.0, 400.0),
                one_run_line("B", "Helvetica", 26.0, 400.0),
                one_run_line("C", "Helvetica", 22.0, 400.0),
                one_run_line("D", "Helvetica", 18.0, 400.0),
            ],
        )];
        let set = SpanSet::collect(&pages);

        let buckets = SizeStrategy.select_buckets(&set);
        assert_eq!(buckets.len(), MAX_LEVELS);

        let outline = SizeStrategy.extract(&set, None);
        // 18pt fell outside the top three sizes; nothing beyond H3
        assert!(outline
            .entries
            .iter()
            .all(|e| e.level <= crate::model::HeadingLevel::H3));
        assert!(!outline.entries.iter().any(|e| e.text == "D"));
    }

    #[test]
    fn test_size_title_lines_excluded_from_outline() {
        let pages = vec![
            page(
                1,
                vec![
                    one_run_line("Annual Report", "Helvetica", 24.0, 400.0),
                    one_run_line(&words(100), "Helvetica", 12.0, 400.0),
                ],
            ),
            page(
                2,
                vec![one_run_line("Annual Report", "Helvetica", 24.0, 400.0)],
            ),
        ];
        let set = SpanSet::collect(&pages);

        let outline = SizeStrategy.extract(&set, None);
        assert_eq!(outline.title.as_deref(), Some("Annual Report"));
        // The page-1 occurrence is claimed by the title; page 2 is not
        assert_eq!(outline.entries.len(), 1);
        assert_eq!(outline.entries[0].page, 2);
    }

    #[test]
    fn test_font_buckets_weight_filter_and_order() {
        let mut lines = Vec::new();
        for _ in 0..5 {
            lines.push(one_run_line("h", "Arial-Bold", 12.0, 400.0));
        }
        for _ in 0..50 {
            lines.push(one_run_line(&words(8), "Arial", 12.0, 400.0));
        }
        for _ in 0..3 {
            lines.push(one_run_line("h", "Times-Black", 12.0, 400.0));
        }
        let set = SpanSet::collect(&[page(1, lines)]);

        let buckets = FontStrategy.select_buckets(&set);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, SignalKey::Font("Arial-Bold".to_string()));
        assert_eq!(buckets[1].key, SignalKey::Font("Times-Black".to_string()));
    }

    #[test]
    fn test_font_tie_break_keeps_first_seen() {
        let lines = vec![
            one_run_line("a", "Foo-Medium", 12.0, 400.0),
            one_run_line("b", "Bar-Bold", 12.0, 400.0),
        ];
        let set = SpanSet::collect(&[page(1, lines)]);

        let buckets = FontStrategy.select_buckets(&set);
        assert_eq!(buckets[0].key, SignalKey::Font("Foo-Medium".to_string()));
        assert_eq!(buckets[1].key, SignalKey::Font("Bar-Bold".to_string()));
    }

    #[test]
    fn test_font_pass_rejects_narrow_and_long_lines() {
        let long_text = "x".repeat(101);
        let lines = vec![
            // Wide enough, short enough: accepted
            one_run_line("1. Introduction", "Arial-Bold", 14.0, 400.0),
            // Too narrow (under half the 612pt page width)
            one_run_line("Narrow", "Arial-Bold", 14.0, 100.0),
            // Too long
            one_run_line(&long_text, "Arial-Bold", 14.0, 400.0),
        ];
        let set = SpanSet::collect(&[page(1, lines)]);

        let outline = FontStrategy.extract(&set, None);
        assert_eq!(outline.entries.len(), 1);
        assert_eq!(outline.entries[0].text, "1. Introduction");
    }

    #[test]
    fn test_font_pass_rejects_multi_run_lines() {
        let lines = vec![RawLine {
            spans: vec![
                run("Heading ", "Arial-Bold", 14.0, 200.0),
                run("icon", "Arial-Bold", 14.0, 200.0),
            ],
        }];
        let set = SpanSet::collect(&[page(1, lines)]);

        let outline = FontStrategy.extract(&set, None);
        assert!(outline.entries.is_empty());
    }

    #[test]
    fn test_font_pass_title_is_first_rank0_page1_entry() {
        let pages = vec![
            page(
                1,
                vec![
                    one_run_line("Report Title", "Arial-Bold", 18.0, 400.0),
                    one_run_line("Second Heading", "Arial-Bold", 18.0, 400.0),
                ],
            ),
            page(
                2,
                vec![one_run_line("Later Heading", "Arial-Bold", 18.0, 400.0)],
            ),
        ];
        let set = SpanSet::collect(&pages);

        let outline = FontStrategy.extract(&set, None);
        assert_eq!(outline.title.as_deref(), Some("Report Title"));
        // Font mode keeps the title line in the outline
        assert_eq!(outline.entries.len(), 3);
    }

    #[test]
    fn test_fallback_runs_size_pass_when_no_weight_fonts() {
        let pages = vec![page(
            1,
            vec![
                one_run_line(&words(100), "Helvetica", 12.0, 400.0),
                one_run_line("Heading", "Helvetica", 18.0, 400.0),
            ],
        )];
        let set = SpanSet::collect(&pages);

        // Font pass alone finds nothing
        assert!(FontStrategy.extract(&set, None).entries.is_empty());

        // Composite falls back to size ranking
        let outline = FontThenSizeFallback::default().extract(&set, None);
        assert_eq!(outline.entries.len(), 0); // heading claimed as title
        assert_eq!(outline.title.as_deref(), Some("Heading"));
    }

    #[test]
    fn test_fallback_prefers_font_pass_results() {
        let pages = vec![page(
            1,
            vec![
                one_run_line("Bold Heading Line", "Arial-Bold", 14.0, 400.0),
                one_run_line(&words(100), "Helvetica", 12.0, 400.0),
            ],
        )];
        let set = SpanSet::collect(&pages);

        let outline = FontThenSizeFallback::default().extract(&set, None);
        assert_eq!(outline.entries.len(), 1);
        assert_eq!(outline.entries[0].text, "Bold Heading Line");
    }

    #[test]
    fn test_idempotence() {
        let pages = vec![page(
            1,
            vec![
                one_run_line(&words(60), "Helvetica", 12.0, 400.0),
                one_run_line("1. Introduction", "Helvetica", 18.0, 400.0),
                one_run_line("Title", "Helvetica", 24.0, 400.0),
            ],
        )];
        let set = SpanSet::collect(&pages);

        let first = SizeStrategy.extract(&set, None);
        let second = SizeStrategy.extract(&set, None);
        assert_eq!(first.title, second.title);
        assert_eq!(first.entries, second.entries);
    }

    #[test]
    fn test_is_heading_weight() {
        assert!(is_heading_weight("Arial-Bold"));
        assert!(is_heading_weight("NotoSans-Black"));
        assert!(is_heading_weight("Roboto-Medium"));
        assert!(is_heading_weight("SOMEFONT-HEAVY"));
        assert!(!is_heading_weight("Arial"));
        assert!(!is_heading_weight(""));
    }
}
