//! Outline projection
//!
//! Turns parsed regions and tags into the read-only views editors consume:
//! a symbol list for outline/breadcrumb panels and folding ranges.

mod project;

pub use project::project;

use serde::Serialize;

use crate::model::Span;

const REGION_DETAIL_PREFIX: &str = "__om_Region__";
const TAG_DETAIL_PREFIX: &str = "__om_Tag__";

/// Symbol kind for display and categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutlineKind {
    Region,
    Tag,
}

impl OutlineKind {
    /// Short label for rendering in the outline tree
    pub fn label(&self) -> &'static str {
        match self {
            OutlineKind::Region => "Region",
            OutlineKind::Tag => "Tag",
        }
    }

    fn detail_prefix(&self) -> &'static str {
        match self {
            OutlineKind::Region => REGION_DETAIL_PREFIX,
            OutlineKind::Tag => TAG_DETAIL_PREFIX,
        }
    }

    /// Recover the kind and description from an encoded detail string
    pub fn decode_detail(detail: &str) -> Option<(OutlineKind, &str)> {
        [OutlineKind::Region, OutlineKind::Tag]
            .into_iter()
            .find_map(|kind| {
                detail
                    .strip_prefix(kind.detail_prefix())
                    .map(|rest| (kind, rest))
            })
    }
}

/// A range in the document (line/col are 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutlineRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl OutlineRange {
    /// Whether `other` lies fully inside this range
    pub fn contains(&self, other: &OutlineRange) -> bool {
        (self.start_line, self.start_col) <= (other.start_line, other.start_col)
            && (other.end_line, other.end_col) <= (self.end_line, self.end_col)
    }
}

impl From<Span> for OutlineRange {
    fn from(span: Span) -> Self {
        Self {
            start_line: span.start.line,
            start_col: span.start.column,
            end_line: span.end.line,
            end_col: span.end.column,
        }
    }
}

/// One region or tag as seen by an outline consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineSymbol {
    pub name: String,
    /// Description text, if the marker had one
    pub detail: Option<String>,
    pub kind: OutlineKind,
    /// Whole region (start line to end line) or the tag's line
    pub range: OutlineRange,
    /// The name token, used for navigation and rename
    pub selection_range: OutlineRange,
}

impl OutlineSymbol {
    /// Detail string with the kind folded in, for consumers that only carry
    /// free-form detail text
    pub fn encoded_detail(&self) -> String {
        format!(
            "{}{}",
            self.kind.detail_prefix(),
            self.detail.as_deref().unwrap_or("")
        )
    }
}

/// A foldable line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FoldingSpan {
    pub start_line: usize,
    pub end_line: usize,
}

/// A single node in the nested outline tree
#[derive(Debug, Clone, Serialize)]
pub struct OutlineNode {
    pub kind: OutlineKind,
    pub name: String,
    pub detail: Option<String>,
    pub range: OutlineRange,
    pub selection_range: OutlineRange,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Whether this node has children (can be expanded/collapsed)
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Complete outline for a document
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutlineData {
    pub revision: u64,
    /// Regions in discovery order, then tags in discovery order
    pub symbols: Vec<OutlineSymbol>,
    /// One span per region, in region order
    pub folding: Vec<FoldingSpan>,
}

impl OutlineData {
    /// Create an empty outline
    pub fn empty(revision: u64) -> Self {
        Self {
            revision,
            ..Self::default()
        }
    }

    /// Check if the outline has any symbols
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Nest symbols by range containment, sorted by document position
    pub fn tree(&self) -> Vec<OutlineNode> {
        project::build_tree_by_containment(&self.symbols)
    }

    /// Nested tree as JSON, the payload a webview outline renders from
    pub fn tree_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.tree())
            .map_err(|e| format!("Failed to serialize outline: {}", e))
    }
}
