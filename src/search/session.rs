//! Incremental search over a mirrored outline tree
//!
//! A session owns one [`TreeMirror`] and the last query run against it. A new
//! query that only narrows the previous one re-walks the existing mirror, so
//! nodes that already failed are skipped without running the predicate.
//! Anything else rebuilds the mirror from the view.

use std::fmt::Debug;

use super::query::{Predicate, Query};
use super::tree::{Evaluation, MatchState, NodeId, OutlineView, TreeMirror};

/// Jump keys handed out in order: digits, lowercase, uppercase
pub const QUICK_NAV_KEYS: &str = "1234567890abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Quick-nav keys in assignment order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickNavMap<H> {
    entries: Vec<(char, H)>,
}

impl<H: Copy> QuickNavMap<H> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: char) -> Option<H> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, handle)| *handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, H)> + '_ {
        self.entries.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

impl<H: Copy> Default for QuickNavMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Predicate work done by one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes the predicate ran on
    pub evaluated: usize,
    /// Nodes rejected without running the predicate
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Some node anywhere in the tree matched
    pub found_any: bool,
    /// The mirror was rebuilt from the view for this walk
    pub rebuilt: bool,
    pub stats: SearchStats,
}

/// One live search over an outline view
#[derive(Debug)]
pub struct SearchSession<H> {
    mirror: TreeMirror<H>,
    query: Query,
    found_any: bool,
}

impl<H: Copy + Eq + Debug> SearchSession<H> {
    /// Mirror the view under `root` and run the first query
    pub fn start<V: OutlineView<Handle = H>>(
        view: &mut V,
        root: H,
        query: Query,
    ) -> (Self, SearchOutcome) {
        let mut session = Self {
            mirror: TreeMirror::build(view, root),
            query,
            found_any: false,
        };
        let mut outcome = session.run(view);
        outcome.rebuilt = true;
        (session, outcome)
    }

    /// Run `query`, reusing the mirror when it narrows the previous query
    pub fn search<V: OutlineView<Handle = H>>(
        &mut self,
        view: &mut V,
        root: H,
        query: Query,
    ) -> SearchOutcome {
        let reuse = query.extends(&self.query);
        if !reuse {
            self.mirror.teardown(view);
            self.mirror = TreeMirror::build(view, root);
        }
        self.query = query;

        let mut outcome = self.run(view);
        outcome.rebuilt = !reuse;
        outcome
    }

    fn run<V: OutlineView<Handle = H>>(&mut self, view: &mut V) -> SearchOutcome {
        let mut stats = SearchStats::default();

        let found_any = match (self.query.compile(), self.mirror.root()) {
            (Some(predicate), Some(root)) => {
                let kind_filter = self.query.kind_filter.clone();
                self.walk(root, &predicate, kind_filter.as_deref(), &mut stats)
            }
            _ => false,
        };
        self.found_any = found_any;

        tracing::debug!(
            "Search {:?}: found={} evaluated={} skipped={}",
            self.query.pattern,
            found_any,
            stats.evaluated,
            stats.skipped
        );

        // Keys from an earlier assignment no longer point at current matches
        for id in (0..self.mirror.len()).map(NodeId) {
            self.mirror.set_quick_nav(id, None);
        }
        self.mirror.render(view);
        self.mirror.render_quick_nav(view);

        SearchOutcome {
            found_any,
            rebuilt: false,
            stats,
        }
    }

    /// Post-order walk. Returns whether the node or anything below it matched.
    fn walk(
        &mut self,
        id: NodeId,
        predicate: &Predicate,
        kind_filter: Option<&str>,
        stats: &mut SearchStats,
    ) -> bool {
        let children = self.mirror.node(id).children.clone();
        let mut descendant = false;
        for child in children {
            // No short-circuit: every child needs its flags updated
            descendant |= self.walk(child, predicate, kind_filter, stats);
        }
        self.mirror.set_descendant_matched(id, descendant);

        let matched = match self.mirror.match_node(id, predicate, kind_filter) {
            Evaluation::Evaluated { matched } => {
                stats.evaluated += 1;
                matched
            }
            Evaluation::Memoized | Evaluation::Rejected => {
                stats.skipped += 1;
                false
            }
        };

        matched || descendant
    }

    /// Hand out jump keys to matched nodes in pre-order.
    ///
    /// Subtrees without a matched descendant are skipped. Once the alphabet
    /// runs out the remaining matches get no key.
    pub fn assign_quick_nav_keys<V: OutlineView<Handle = H>>(
        &mut self,
        view: &mut V,
    ) -> QuickNavMap<H> {
        let mut map = QuickNavMap::new();
        let mut keys = QUICK_NAV_KEYS.chars();
        let mut pending: Vec<NodeId> = self.mirror.root().into_iter().collect();

        while let Some(id) = pending.pop() {
            let node = self.mirror.node(id);
            let handle = node.handle;
            let descend = node.descendant_match == MatchState::Matched;
            let children = node.children.clone();

            let key = if node.self_match == MatchState::Matched {
                keys.next()
            } else {
                None
            };
            if let Some(key) = key {
                map.entries.push((key, handle));
            }
            self.mirror.set_quick_nav(id, key);

            if descend {
                pending.extend(children.into_iter().rev());
            }
        }

        self.mirror.render_quick_nav(view);
        tracing::debug!("Assigned {} quick-nav keys", map.len());
        map
    }

    pub fn found_any(&self) -> bool {
        self.found_any
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn mirror(&self) -> &TreeMirror<H> {
        &self.mirror
    }

    /// End the session, restoring the view's plain labels and flags
    pub fn teardown<V: OutlineView<Handle = H>>(mut self, view: &mut V) {
        self.mirror.teardown(view);
    }
}
