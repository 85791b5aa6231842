//! Span collection: flattening decoded pages into the ordered span
//! sequence the heading classifier consumes, together with the size and
//! font histograms it ranks on.

use indexmap::IndexMap;

use crate::parser::backend::{BBox, RawPage};

/// One line of text as a heading candidate.
///
/// A span covers a whole layout line: its text is the concatenation of the
/// line's runs, its font size is the largest run size (rounded to one
/// decimal for grouping), and its font name is the first run's. Spans are
/// immutable once collected and live only for the extraction pass.
#[derive(Debug, Clone)]
pub struct Span {
    /// Page number (1-indexed)
    pub page: u32,
    /// Trimmed line text
    pub text: String,
    /// Font name of the line's first run; empty if unknown
    pub font_name: String,
    /// Largest run font size in the line, rounded to one decimal
    pub font_size: f32,
    /// Line bounding box
    pub bbox: BBox,
    /// Number of runs the line was assembled from
    pub span_count: usize,
}

impl Span {
    /// Grouping key for the font size (tenths of a point).
    pub fn size_key(&self) -> i32 {
        size_key(self.font_size)
    }

    /// Whitespace-separated word count of the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Grouping key for a font size (tenths of a point).
pub fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// The collected span sequence plus the aggregate signal histograms.
///
/// Both histograms preserve first-seen insertion order, which is what makes
/// frequency tie-breaks deterministic.
#[derive(Debug, Clone, Default)]
pub struct SpanSet {
    spans: Vec<Span>,
    /// size key → aggregate word count across spans of that size
    size_words: IndexMap<i32, usize>,
    /// font name → number of runs using it, across all lines
    font_spans: IndexMap<String, usize>,
    /// page number → page width
    page_widths: IndexMap<u32, f32>,
}

impl SpanSet {
    /// Collect the span sequence for a whole document, in page order.
    ///
    /// Empty-after-trim lines are skipped. The font histogram counts every
    /// run, including runs of multi-run lines that can never become heading
    /// candidates themselves.
    pub fn collect(pages: &[RawPage]) -> Self {
        let mut set = SpanSet::default();

        for page in pages {
            set.page_widths.insert(page.number, page.width);

            for line in &page.lines {
                let text = line.text().trim().to_string();
                if text.is_empty() {
                    continue;
                }

                for run in &line.spans {
                    *set.font_spans.entry(run.font_name.clone()).or_insert(0) += 1;
                }

                let font_size = (line.max_font_size() * 10.0).round() / 10.0;
                let span = Span {
                    page: page.number,
                    font_name: line
                        .spans
                        .first()
                        .map(|s| s.font_name.clone())
                        .unwrap_or_default(),
                    font_size,
                    bbox: line.bbox(),
                    span_count: line.spans.len(),
                    text,
                };

                *set.size_words.entry(span.size_key()).or_insert(0) += span.word_count();
                set.spans.push(span);
            }
        }

        set
    }

    /// The spans in document scan order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether no spans were collected.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// size key → aggregate word count, first-seen order.
    pub fn size_words(&self) -> &IndexMap<i32, usize> {
        &self.size_words
    }

    /// font name → run count, first-seen order.
    pub fn font_spans(&self) -> &IndexMap<String, usize> {
        &self.font_spans
    }

    /// Width of the given page; Letter width when unknown.
    pub fn page_width(&self, page: u32) -> f32 {
        self.page_widths.get(&page).copied().unwrap_or(612.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::backend::{RawLine, RawSpan};

    fn run(text: &str, font: &str, size: f32) -> RawSpan {
        RawSpan {
            text: text.to_string(),
            font_name: font.to_string(),
            font_size: size,
            bbox: BBox::new(72.0, 700.0, 300.0, 712.0),
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

    #[test]
    fn test_collect_skips_blank_lines() {
        let pages = vec![page(
            1,
            vec![
                RawLine {
                    spans: vec![run("  ", "Helvetica", 12.0)],
                },
                RawLine {
                    spans: vec![run("Hello", "Helvetica", 12.0)],
                },
            ],
        )];

        let set = SpanSet::collect(&pages);
        assert_eq!(set.spans().len(), 1);
        assert_eq!(set.spans()[0].text, "Hello");
    }

    #[test]
    fn test_line_takes_max_run_size() {
        let pages = vec![page(
            1,
            vec![RawLine {
                spans: vec![run("Big ", "Helvetica", 18.0), run("small", "Helvetica", 9.0)],
            }],
        )];

        let set = SpanSet::collect(&pages);
        let span = &set.spans()[0];
        assert_eq!(span.text, "Big small");
        assert!((span.font_size - 18.0).abs() < f32::EPSILON);
        assert_eq!(span.span_count, 2);
    }

    #[test]
    fn test_size_rounds_to_one_decimal() {
        let pages = vec![page(
            1,
            vec![RawLine {
                spans: vec![run("text", "Helvetica", 11.96)],
            }],
        )];

        let set = SpanSet::collect(&pages);
        assert!((set.spans()[0].font_size - 12.0).abs() < 1e-5);
        assert_eq!(set.spans()[0].size_key(), 120);
    }

    #[test]
    fn test_font_histogram_counts_every_run() {
        let pages = vec![page(
            1,
            vec![
                RawLine {
                    spans: vec![
                        run("a ", "Arial-Bold", 12.0),
                        run("b", "Arial", 12.0),
                    ],
                },
                RawLine {
                    spans: vec![run("c", "Arial", 12.0)],
                },
            ],
        )];

        let set = SpanSet::collect(&pages);
        assert_eq!(set.font_spans().get("Arial-Bold"), Some(&1));
        assert_eq!(set.font_spans().get("Arial"), Some(&2));
    }

    #[test]
    fn test_size_histogram_counts_words() {
        let pages = vec![page(
            1,
            vec![
                RawLine {
                    spans: vec![run("one two three", "Helvetica", 12.0)],
                },
                RawLine {
                    spans: vec![run("four five", "Helvetica", 12.0)],
                },
                RawLine {
                    spans: vec![run("Heading", "Helvetica", 18.0)],
                },
            ],
        )];

        let set = SpanSet::collect(&pages);
        assert_eq!(set.size_words().get(&120), Some(&5));
        assert_eq!(set.size_words().get(&180), Some(&1));
    }

    #[test]
    fn test_page_width_lookup() {
        let set = SpanSet::collect(&[page(1, vec![])]);
        assert!((set.page_width(1) - 612.0).abs() < f32::EPSILON);
        // Unknown pages default to Letter width
        assert!((set.page_width(7) - 612.0).abs() < f32::EPSILON);
    }
}
