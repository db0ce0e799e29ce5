//! Benchmarks for region parsing
//!
//! Run with: cargo bench parse

use landmark::model::Document;
use landmark::region::{parse, CancellationToken, LineMatcher, Markers, MatchLine, RegionProvider};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Source with one region and one tag per 12-line block
fn marked_source(blocks: usize) -> String {
    let block = r#"// #region block setup for this block
fn main() {
    let x = 42;
    // #tag answer the value everything depends on
    let y = x + 1;
    println!("Result: {}", y);
}

fn helper() -> u32 {
    7
}
// #endregion block
"#;
    block.repeat(blocks)
}

// ============================================================================
// Line matching
// ============================================================================

#[divan::bench]
fn match_marker_line(bencher: divan::Bencher) {
    let matcher = LineMatcher::new(&Markers::default());
    bencher.bench_local(|| {
        divan::black_box(matcher.match_line(divan::black_box("    // #region setup prepare fixtures"), 0))
    });
}

#[divan::bench]
fn match_plain_line(bencher: divan::Bencher) {
    let matcher = LineMatcher::new(&Markers::default());
    bencher.bench_local(|| {
        divan::black_box(matcher.match_line(divan::black_box("    let y = x + 1;"), 0))
    });
}

// ============================================================================
// Whole documents
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn parse_document(bencher: divan::Bencher, blocks: usize) {
    let doc = Document::with_text(&marked_source(blocks));
    let matcher = LineMatcher::new(&Markers::default());
    let cancel = CancellationToken::new();

    bencher.bench_local(|| divan::black_box(parse(&doc, &matcher, &cancel)));
}

#[divan::bench(args = [1_000, 10_000])]
fn provider_memoized_update(bencher: divan::Bencher, blocks: usize) {
    let doc = Document::with_text(&marked_source(blocks));
    let mut provider = RegionProvider::new(&Markers::default());
    let cancel = CancellationToken::new();
    provider.update(&doc, &cancel);

    // Same version: no re-parse
    bencher.bench_local(|| divan::black_box(provider.update(&doc, &cancel)));
}
