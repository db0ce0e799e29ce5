//! Region and tag markers
//!
//! A region is a start/end marker pair in comments:
//!
//! ```text
//! // #region setup prepare the fixtures
//! ...
//! // #endregion setup
//! ```
//!
//! A tag is a single marker line (`// #tag todo fix this`). Every matched line
//! is split into key, name and description tokens with precise spans so the
//! editor can decorate and rename them.

pub mod completion;
mod matcher;
mod parser;
mod provider;

pub use matcher::{LineMatcher, MatchLine};
pub use parser::{parse, CancellationToken, ParsedRegions};
pub use provider::{Decoration, Decorations, RegionProvider, RenameError, RenameTarget, TextEdit};

use crate::model::Span;

/// Role of a token inside a marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Key,
    Name,
    Description,
}

/// A piece of a marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// What a matched line declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    RegionStart,
    RegionEnd,
    Tag,
}

/// Result of matching a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMatch {
    pub kind: MatchKind,
    pub key: Token,
    pub name: Option<Token>,
    pub description: Option<Token>,
}

/// A single-line point of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: Token,
    pub name: Token,
    pub description: Option<Token>,
    /// Span of the whole line
    pub line: Span,
}

/// A resolved start/end pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Key token on the start line
    pub key: Token,
    /// Key token on the end line
    pub key_end: Token,
    pub name: Token,
    /// Name repeated on the end line, if the end marker carried one
    pub name_end: Option<Token>,
    pub description: Option<Token>,
    /// Span of the whole start line
    pub start: Span,
    /// Span of the whole end line
    pub end: Span,
}

/// The three configurable marker strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
    pub tag: String,
    /// Escape regex metacharacters before building the line patterns.
    ///
    /// Off by default: markers are inserted into the patterns verbatim.
    pub escape: bool,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            tag: tag.into(),
            escape: false,
        }
    }

    pub fn escaped(mut self) -> Self {
        self.escape = true;
        self
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new("#region", "#endregion", "#tag")
    }
}
