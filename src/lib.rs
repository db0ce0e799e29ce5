//! Landmark - region and tag outlines with live tree search
//!
//! Parses comment-embedded `#region`/`#endregion`/`#tag` markers out of a
//! document, projects them into an outline (symbols, folding spans, rename
//! edits) and runs incremental literal/regex/fuzzy searches over a rendered
//! outline tree with quick-nav jump keys.

pub mod config;
pub mod config_paths;
pub mod model;
pub mod outline;
pub mod region;
pub mod search;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::RegionConfig;
pub use model::{Document, Position, Span, TextSource};
pub use outline::{OutlineData, OutlineKind, OutlineSymbol};
pub use region::{CancellationToken, LineMatcher, Markers, RegionProvider};
pub use search::{OutlineView, Query, SearchController, SearchSession};
