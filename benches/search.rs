//! Benchmarks for outline tree search
//!
//! Run with: cargo bench search

use landmark::search::{OutlineView, Query, SearchSession};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Minimal outline view: item 0 is the root, labels are fixed
struct BenchView {
    labels: Vec<String>,
    children: Vec<Vec<usize>>,
}

impl BenchView {
    /// `regions` regions with `tags` tags each
    fn new(regions: usize, tags: usize) -> Self {
        let mut view = Self {
            labels: vec![String::new()],
            children: vec![Vec::new()],
        };
        for r in 0..regions {
            let region = view.push(0, format!("region_{r}_setup"));
            for t in 0..tags {
                view.push(region, format!("tag_{r}_{t}_todo"));
            }
        }
        view
    }

    fn push(&mut self, parent: usize, label: String) -> usize {
        let id = self.labels.len();
        self.labels.push(label);
        self.children.push(Vec::new());
        self.children[parent].push(id);
        id
    }
}

impl OutlineView for BenchView {
    type Handle = usize;

    fn children(&self, item: usize) -> Vec<usize> {
        self.children[item].clone()
    }

    fn label(&self, item: usize) -> String {
        self.labels[item].clone()
    }

    fn kind(&self, _item: usize) -> Option<String> {
        None
    }

    fn set_matched(&mut self, _item: usize, _matched: bool) {}
    fn set_descendant_matched(&mut self, _item: usize, _matched: bool) {}
    fn set_label_markup(&mut self, _item: usize, markup: &str) {
        divan::black_box(markup);
    }
    fn set_quick_nav(&mut self, _item: usize, _key: Option<char>) {}
}

// ============================================================================
// Fresh searches
// ============================================================================

#[divan::bench(args = [100, 1_000])]
fn search_literal(bencher: divan::Bencher, regions: usize) {
    let mut view = BenchView::new(regions, 10);
    bencher.bench_local(|| {
        let (session, outcome) = SearchSession::start(&mut view, 0, Query::literal("todo"));
        divan::black_box(outcome);
        session.teardown(&mut view);
    });
}

#[divan::bench(args = [100, 1_000])]
fn search_fuzzy(bencher: divan::Bencher, regions: usize) {
    let mut view = BenchView::new(regions, 10);
    bencher.bench_local(|| {
        let (session, outcome) = SearchSession::start(&mut view, 0, Query::fuzzy("rgsp"));
        divan::black_box(outcome);
        session.teardown(&mut view);
    });
}

// ============================================================================
// Incremental typing
// ============================================================================

#[divan::bench(args = [100, 1_000])]
fn type_query_reusing_mirror(bencher: divan::Bencher, regions: usize) {
    let mut view = BenchView::new(regions, 10);
    bencher.bench_local(|| {
        let (mut session, _) = SearchSession::start(&mut view, 0, Query::literal("r"));
        for pattern in ["re", "reg", "regi", "regio", "region_9"] {
            divan::black_box(session.search(&mut view, 0, Query::literal(pattern)));
        }
        session.teardown(&mut view);
    });
}

#[divan::bench(args = [1_000])]
fn assign_quick_nav(bencher: divan::Bencher, regions: usize) {
    let mut view = BenchView::new(regions, 10);
    let (mut session, _) = SearchSession::start(&mut view, 0, Query::literal("todo"));
    bencher.bench_local(|| divan::black_box(session.assign_quick_nav_keys(&mut view)));
}
