//! Benchmarks for the outline inference core.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the classification strategies over synthetic span
//! sets, independent of PDF decoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use outpdf::outline::{FontThenSizeFallback, HeadingStrategy, SizeStrategy, SpanSet};
use outpdf::parser::{BBox, RawLine, RawPage, RawSpan};

/// Build a synthetic document: per page one bold heading, one numbered
/// subheading and a block of body lines.
fn create_test_pages(page_count: u32, body_lines: usize) -> Vec<RawPage> {
    (1..=page_count)
        .map(|number| {
            let mut lines = Vec::with_capacity(body_lines + 2);
            lines.push(line(
                &format!("Section {number} Overview And Discussion"),
                "Helvetica-Bold",
                20.0,
            ));
            lines.push(line(&format!("{number}.1 Details"), "Helvetica-Bold", 14.0));
            for i in 0..body_lines {
                lines.push(line(
                    &format!("body line {i} with a handful of ordinary words in it"),
                    "Helvetica",
                    11.0,
                ));
            }
            RawPage {
                number,
                width: 612.0,
                height: 792.0,
                lines,
            }
        })
        .collect()
}

fn line(text: &str, font: &str, size: f32) -> RawLine {
    let width = text.chars().count() as f32 * size * 0.5;
    RawLine {
        spans: vec![RawSpan {
            text: text.to_string(),
            font_name: font.to_string(),
            font_size: size,
            bbox: BBox::new(72.0, 700.0, 72.0 + width, 700.0 + size),
        }],
    }
}

fn bench_span_collection(c: &mut Criterion) {
    let pages = create_test_pages(50, 40);

    c.bench_function("collect_spans_50_pages", |b| {
        b.iter(|| SpanSet::collect(black_box(&pages)));
    });
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    for page_count in [5, 50].iter() {
        let pages = create_test_pages(*page_count, 40);
        let set = SpanSet::collect(&pages);

        group.bench_function(format!("size_{}_pages", page_count), |b| {
            b.iter(|| SizeStrategy.extract(black_box(&set), None));
        });

        group.bench_function(format!("font_then_size_{}_pages", page_count), |b| {
            b.iter(|| FontThenSizeFallback::default().extract(black_box(&set), None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_span_collection, bench_strategies);
criterion_main!(benches);
