//! Table detection using text position analysis.
//!
//! Stream-mode detection: tables are found by column alignment of text
//! edges across consecutive lines, without relying on graphical rules.

use crate::model::Table;

use super::backend::{RawLine, RawPage};

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// X tolerance for clustering span left edges into columns (points)
    pub column_tolerance: f32,
    /// Minimum fraction of rows that must populate at least `min_columns`
    pub min_alignment_ratio: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 8,
            column_tolerance: 12.0,
            min_alignment_ratio: 0.6,
        }
    }
}

/// Detects tables on a page from span alignment.
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self {
            config: TableDetectorConfig::default(),
        }
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables on the given page.
    pub fn detect(&self, page: &RawPage) -> Vec<Table> {
        let mut tables = Vec::new();

        // Candidate rows are consecutive lines with multiple spans
        let mut run: Vec<&RawLine> = Vec::new();
        for line in &page.lines {
            if line.spans.len() >= self.config.min_columns {
                run.push(line);
            } else {
                self.flush_run(&mut run, page.number, &mut tables);
            }
        }
        self.flush_run(&mut run, page.number, &mut tables);

        log::debug!(
            "TableDetector: page {} yielded {} table(s)",
            page.number,
            tables.len()
        );

        tables
    }

    fn flush_run(&self, run: &mut Vec<&RawLine>, page: u32, tables: &mut Vec<Table>) {
        if run.len() >= self.config.min_rows {
            if let Some(table) = self.run_to_table(run, page) {
                tables.push(table);
            }
        }
        run.clear();
    }

    /// Convert a run of multi-span lines into a table, if alignment holds.
    fn run_to_table(&self, run: &[&RawLine], page: u32) -> Option<Table> {
        let columns = self.cluster_columns(run);

        if columns.len() < self.config.min_columns || columns.len() > self.config.max_columns {
            return None;
        }

        // Require most rows to populate enough distinct columns
        let aligned = run
            .iter()
            .filter(|line| {
                let mut hit = vec![false; columns.len()];
                for span in &line.spans {
                    hit[self.nearest_column(&columns, span.bbox.x0)] = true;
                }
                hit.iter().filter(|h| **h).count() >= self.config.min_columns
            })
            .count();

        if (aligned as f32) < run.len() as f32 * self.config.min_alignment_ratio {
            return None;
        }

        let rows = run
            .iter()
            .map(|line| {
                let mut cells = vec![String::new(); columns.len()];
                for span in &line.spans {
                    let col = self.nearest_column(&columns, span.bbox.x0);
                    if !cells[col].is_empty() {
                        cells[col].push(' ');
                    }
                    cells[col].push_str(span.text.trim());
                }
                cells
            })
            .collect();

        Some(Table::new(page, rows))
    }

    /// Cluster span left edges across the run into column positions.
    fn cluster_columns(&self, run: &[&RawLine]) -> Vec<f32> {
        let mut edges: Vec<f32> = run
            .iter()
            .flat_map(|line| line.spans.iter().map(|s| s.bbox.x0))
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut columns: Vec<(f32, usize)> = Vec::new(); // (sum, count) per cluster
        let mut last_edge = f32::NEG_INFINITY;

        for edge in edges {
            if edge - last_edge > self.config.column_tolerance {
                columns.push((edge, 1));
            } else if let Some(cluster) = columns.last_mut() {
                cluster.0 += edge;
                cluster.1 += 1;
            }
            last_edge = edge;
        }

        columns
            .into_iter()
            .map(|(sum, count)| sum / count as f32)
            .collect()
    }

    fn nearest_column(&self, columns: &[f32], x: f32) -> usize {
        columns
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (x - **a)
                    .abs()
                    .partial_cmp(&(x - **b).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::backend::{BBox, RawSpan};

    fn span(text: &str, x: f32, y: f32) -> RawSpan {
        RawSpan {
            text: text.to_string(),
            font_name: "Helvetica".to_string(),
            font_size: 10.0,
            bbox: BBox::new(x, y - 2.0, x + 40.0, y + 8.0),
        }
    }

    fn line(spans: Vec<RawSpan>) -> RawLine {
        RawLine { spans }
    }

    fn page(lines: Vec<RawLine>) -> RawPage {
        RawPage {
            number: 1,
            width: 612.0,
            height: 792.0,
            lines,
        }
    }

    #[test]
    fn test_detects_aligned_grid() {
        let page = page(vec![
            line(vec![span("Name", 72.0, 700.0), span("Value", 300.0, 700.0)]),
            line(vec![span("Alpha", 72.0, 685.0), span("1", 300.0, 685.0)]),
            line(vec![span("Beta", 72.0, 670.0), span("2", 300.0, 670.0)]),
        ]);

        let tables = TableDetector::new().detect(&page);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].row_count(), 3);
        assert_eq!(tables[0].column_count(), 2);
        assert_eq!(tables[0].rows[0], vec!["Name", "Value"]);
        assert_eq!(tables[0].rows[2], vec!["Beta", "2"]);
    }

    #[test]
    fn test_single_span_lines_are_not_tables() {
        let page = page(vec![
            line(vec![span("A paragraph of text", 72.0, 700.0)]),
            line(vec![span("continues across lines", 72.0, 685.0)]),
            line(vec![span("with one span each", 72.0, 670.0)]),
        ]);

        let tables = TableDetector::new().detect(&page);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_short_run_is_ignored() {
        let page = page(vec![line(vec![
            span("Lonely", 72.0, 700.0),
            span("Row", 300.0, 700.0),
        ])]);

        let tables = TableDetector::new().detect(&page);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_misaligned_run_is_rejected() {
        // Spans scattered at unrelated X positions on every row
        let page = page(vec![
            line(vec![span("a", 72.0, 700.0), span("b", 120.0, 700.0)]),
            line(vec![span("c", 200.0, 685.0), span("d", 430.0, 685.0)]),
            line(vec![span("e", 310.0, 670.0), span("f", 520.0, 670.0)]),
        ]);

        let detector = TableDetector::with_config(TableDetectorConfig {
            max_columns: 3,
            ..Default::default()
        });
        assert!(detector.detect(&page).is_empty());
    }
}
