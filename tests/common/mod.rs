//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::Cell;

use landmark::outline::OutlineNode;
use landmark::region::{CancellationToken, LineMatcher, MatchLine, Markers, RegionMatch};
use landmark::search::OutlineView;
use landmark::Document;

/// Document with `text`, ready to be parsed
pub fn doc(text: &str) -> Document {
    Document::with_text(text)
}

/// One rendered item of the fake outline
#[derive(Debug, Clone, Default)]
pub struct FakeItem {
    pub label: String,
    pub kind: Option<String>,
    pub children: Vec<usize>,
    pub matched: bool,
    pub descendant_matched: bool,
    pub markup: String,
    pub quick_nav: Option<char>,
}

/// In-memory outline view; item 0 is an unlabeled root container
#[derive(Debug, Clone)]
pub struct FakeView {
    pub items: Vec<FakeItem>,
    /// Number of `set_*` calls received
    pub writes: usize,
}

pub const ROOT: usize = 0;

impl FakeView {
    pub fn new() -> Self {
        Self {
            items: vec![FakeItem::default()],
            writes: 0,
        }
    }

    /// Add an item under `parent`, returning its handle
    pub fn add(&mut self, parent: usize, label: &str, kind: Option<&str>) -> usize {
        let id = self.items.len();
        self.items.push(FakeItem {
            label: label.to_string(),
            kind: kind.map(str::to_string),
            markup: label.to_string(),
            ..FakeItem::default()
        });
        self.items[parent].children.push(id);
        id
    }

    /// Render a nested outline the way an outline panel would
    pub fn from_outline(nodes: &[OutlineNode]) -> Self {
        let mut view = Self::new();
        view.add_nodes(ROOT, nodes);
        view
    }

    fn add_nodes(&mut self, parent: usize, nodes: &[OutlineNode]) {
        for node in nodes {
            let id = self.add(parent, &node.name, Some(node.kind.label()));
            self.add_nodes(id, &node.children);
        }
    }

    /// Handle of the first item labeled `label`
    pub fn handle(&self, label: &str) -> usize {
        self.items
            .iter()
            .position(|item| item.label == label)
            .unwrap_or_else(|| panic!("no item labeled {label:?}"))
    }

    pub fn item(&self, label: &str) -> &FakeItem {
        &self.items[self.handle(label)]
    }

    /// Labels of items currently flagged as matched, in insertion order
    pub fn matched_labels(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.matched)
            .map(|item| item.label.as_str())
            .collect()
    }

    /// True when no item carries search state
    pub fn is_pristine(&self) -> bool {
        self.items.iter().all(|item| {
            !item.matched
                && !item.descendant_matched
                && item.quick_nav.is_none()
                && item.markup == item.label
        })
    }
}

impl OutlineView for FakeView {
    type Handle = usize;

    fn children(&self, item: usize) -> Vec<usize> {
        self.items[item].children.clone()
    }

    fn label(&self, item: usize) -> String {
        self.items[item].label.clone()
    }

    fn kind(&self, item: usize) -> Option<String> {
        self.items[item].kind.clone()
    }

    fn set_matched(&mut self, item: usize, matched: bool) {
        self.writes += 1;
        self.items[item].matched = matched;
    }

    fn set_descendant_matched(&mut self, item: usize, matched: bool) {
        self.writes += 1;
        self.items[item].descendant_matched = matched;
    }

    fn set_label_markup(&mut self, item: usize, markup: &str) {
        self.writes += 1;
        self.items[item].markup = markup.to_string();
    }

    fn set_quick_nav(&mut self, item: usize, key: Option<char>) {
        self.writes += 1;
        self.items[item].quick_nav = key;
    }
}

/// Outline used by the search tests:
///
/// ```text
/// setup (Region)
///   fixtures (Tag)
///   database (Region)
///     migrate (Tag)
/// teardown (Region)
///   cleanup (Tag)
/// ```
pub fn sample_view() -> FakeView {
    let mut view = FakeView::new();
    let setup = view.add(ROOT, "setup", Some("Region"));
    view.add(setup, "fixtures", Some("Tag"));
    let database = view.add(setup, "database", Some("Region"));
    view.add(database, "migrate", Some("Tag"));
    let teardown = view.add(ROOT, "teardown", Some("Region"));
    view.add(teardown, "cleanup", Some("Tag"));
    view
}

/// Flat view with `count` items labeled `item0`, `item1`, ...
pub fn flat_view(count: usize) -> FakeView {
    let mut view = FakeView::new();
    for i in 0..count {
        view.add(ROOT, &format!("item{i}"), Some("Tag"));
    }
    view
}

/// Line matcher that counts how many lines it was asked to match
pub struct CountingMatcher {
    inner: LineMatcher,
    pub calls: Cell<usize>,
}

impl CountingMatcher {
    pub fn new(markers: &Markers) -> Self {
        Self {
            inner: LineMatcher::new(markers),
            calls: Cell::new(0),
        }
    }
}

impl MatchLine for CountingMatcher {
    fn match_line(&self, line: &str, line_number: usize) -> Option<RegionMatch> {
        self.calls.set(self.calls.get() + 1);
        self.inner.match_line(line, line_number)
    }
}

/// Line matcher that cancels `token` from inside its `trip_at`-th call,
/// standing in for an edit that lands mid-parse
pub struct CancellingMatcher {
    inner: LineMatcher,
    pub calls: Cell<usize>,
    pub trip_at: Cell<Option<usize>>,
    pub token: CancellationToken,
}

impl CancellingMatcher {
    pub fn new(markers: &Markers, trip_at: Option<usize>) -> Self {
        Self {
            inner: LineMatcher::new(markers),
            calls: Cell::new(0),
            trip_at: Cell::new(trip_at),
            token: CancellationToken::new(),
        }
    }
}

impl MatchLine for CancellingMatcher {
    fn match_line(&self, line: &str, line_number: usize) -> Option<RegionMatch> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if self.trip_at.get() == Some(call) {
            self.token.cancel();
        }
        self.inner.match_line(line, line_number)
    }
}
