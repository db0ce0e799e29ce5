//! Tree mirror of a rendered outline
//!
//! The mirror is an arena of plain data nodes built from whatever surface
//! renders the outline (a webview, a TUI list). Matching only touches node
//! data; [`TreeMirror::render`] pushes the result back through [`OutlineView`].

use std::fmt::Debug;
use std::ops::Range;

use super::query::Predicate;

/// Opening marker wrapped around the highlighted part of a label
pub const EMPHASIS_OPEN: &str = "<b>";
/// Closing marker wrapped around the highlighted part of a label
pub const EMPHASIS_CLOSE: &str = "</b>";

/// Adapter to the surface that renders the outline tree
pub trait OutlineView {
    /// Opaque reference to one rendered item
    type Handle: Copy + Eq + Debug;

    fn children(&self, item: Self::Handle) -> Vec<Self::Handle>;
    /// Plain display text of the item
    fn label(&self, item: Self::Handle) -> String;
    /// Symbol kind of the item (e.g. "Region", "Tag", "Function")
    fn kind(&self, item: Self::Handle) -> Option<String>;

    fn set_matched(&mut self, item: Self::Handle, matched: bool);
    fn set_descendant_matched(&mut self, item: Self::Handle, matched: bool);
    /// Replace the displayed label, possibly containing emphasis markers
    fn set_label_markup(&mut self, item: Self::Handle, markup: &str);
    fn set_quick_nav(&mut self, item: Self::Handle, key: Option<char>);
}

/// Index of a node in a [`TreeMirror`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Match state of one dimension of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchState {
    /// Not evaluated in this session
    #[default]
    Unknown,
    Matched,
    Unmatched,
}

impl MatchState {
    pub fn from_bool(matched: bool) -> Self {
        if matched {
            MatchState::Matched
        } else {
            MatchState::Unmatched
        }
    }

    pub fn is_matched(&self) -> bool {
        *self == MatchState::Matched
    }
}

/// What happened when a node was matched against a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Already rejected earlier in the session; predicate not run
    Memoized,
    /// Rejected by the kind filter or an empty label; predicate not run
    Rejected,
    /// Predicate ran
    Evaluated { matched: bool },
}

impl Evaluation {
    pub fn matched(&self) -> bool {
        matches!(self, Evaluation::Evaluated { matched: true })
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode<H> {
    pub handle: H,
    pub label: String,
    pub kind: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub self_match: MatchState,
    pub descendant_match: MatchState,
    /// Byte range of `label` to emphasize
    pub highlight: Option<Range<usize>>,
    pub quick_nav: Option<char>,
}

impl<H> TreeNode<H> {
    fn new(handle: H, label: String, kind: Option<String>, parent: Option<NodeId>) -> Self {
        Self {
            handle,
            label,
            kind,
            parent,
            children: Vec::new(),
            self_match: MatchState::Unknown,
            descendant_match: MatchState::Unknown,
            highlight: None,
            quick_nav: None,
        }
    }

    /// Whether a walk has reached this node since the mirror was built
    pub fn is_walked(&self) -> bool {
        self.self_match != MatchState::Unknown || self.descendant_match != MatchState::Unknown
    }

    /// Label with the highlighted range wrapped in emphasis markers
    pub fn highlighted_label(&self) -> String {
        match &self.highlight {
            Some(range) if self.label.get(range.clone()).is_some() => format!(
                "{}{}{}{}{}",
                &self.label[..range.start],
                EMPHASIS_OPEN,
                &self.label[range.clone()],
                EMPHASIS_CLOSE,
                &self.label[range.end..]
            ),
            _ => self.label.clone(),
        }
    }
}

/// Arena-backed mirror of a rendered outline tree
#[derive(Debug, Clone)]
pub struct TreeMirror<H> {
    nodes: Vec<TreeNode<H>>,
}

impl<H: Copy + Eq + Debug> TreeMirror<H> {
    /// Mirror `root` and everything below it
    pub fn build<V: OutlineView<Handle = H>>(view: &V, root: H) -> Self {
        let mut mirror = Self { nodes: Vec::new() };
        let mut pending = vec![(root, None)];

        while let Some((handle, parent)) = pending.pop() {
            let id = NodeId(mirror.nodes.len());
            mirror
                .nodes
                .push(TreeNode::new(handle, view.label(handle), view.kind(handle), parent));
            if let Some(parent) = parent {
                mirror.nodes[parent.0].children.push(id);
            }
            // Reversed so children are numbered in display order
            for child in view.children(handle).into_iter().rev() {
                pending.push((child, Some(id)));
            }
        }

        mirror
    }

    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode<H>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &TreeNode<H> {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TreeNode<H>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Node mirroring `handle`, if any
    pub fn find(&self, handle: H) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.handle == handle)
            .map(NodeId)
    }

    /// Match one node against `predicate`.
    ///
    /// A node already `Unmatched` stays unmatched without running the
    /// predicate; a mirror has to be rebuilt for it to match again.
    pub(crate) fn match_node(
        &mut self,
        id: NodeId,
        predicate: &Predicate,
        kind_filter: Option<&str>,
    ) -> Evaluation {
        let node = &mut self.nodes[id.0];
        if node.self_match == MatchState::Unmatched {
            return Evaluation::Memoized;
        }

        let wrong_kind = kind_filter.is_some_and(|kind| node.kind.as_deref() != Some(kind));
        if wrong_kind || node.label.is_empty() {
            node.self_match = MatchState::Unmatched;
            node.highlight = None;
            return Evaluation::Rejected;
        }

        node.highlight = predicate.find(&node.label);
        let matched = node.highlight.is_some();
        node.self_match = MatchState::from_bool(matched);
        Evaluation::Evaluated { matched }
    }

    pub(crate) fn set_descendant_matched(&mut self, id: NodeId, matched: bool) {
        self.nodes[id.0].descendant_match = MatchState::from_bool(matched);
    }

    pub(crate) fn set_quick_nav(&mut self, id: NodeId, key: Option<char>) {
        self.nodes[id.0].quick_nav = key;
    }

    /// Push match flags and highlighted labels of every walked node to the
    /// view. Nodes no walk has reached still show their plain state.
    pub fn render<V: OutlineView<Handle = H>>(&self, view: &mut V) {
        for node in self.nodes.iter().filter(|n| n.is_walked()) {
            view.set_matched(node.handle, node.self_match.is_matched());
            view.set_descendant_matched(node.handle, node.descendant_match.is_matched());
            view.set_label_markup(node.handle, &node.highlighted_label());
        }
    }

    /// Push quick-nav keys of every walked node to the view
    pub fn render_quick_nav<V: OutlineView<Handle = H>>(&self, view: &mut V) {
        for node in self.nodes.iter().filter(|n| n.is_walked()) {
            view.set_quick_nav(node.handle, node.quick_nav);
        }
    }

    /// Undo every change made to the view and drop the mirror's links
    pub fn teardown<V: OutlineView<Handle = H>>(&mut self, view: &mut V) {
        for node in &mut self.nodes {
            view.set_matched(node.handle, false);
            view.set_descendant_matched(node.handle, false);
            view.set_label_markup(node.handle, &node.label);
            view.set_quick_nav(node.handle, None);
            node.children.clear();
            node.parent = None;
            node.highlight = None;
            node.quick_nav = None;
        }
        self.nodes.clear();
    }
}
