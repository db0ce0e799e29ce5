//! Document-level region pairing
//!
//! Walks the document line by line. Region starts are kept on an `unpaired`
//! stack; an end marker with a name closes the most recent unpaired start with
//! that name, an end marker without a name closes the most recent unpaired
//! start. Ends that resolve to nothing and starts still open at the end of the
//! document are dropped without a diagnostic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::matcher::MatchLine;
use super::{MatchKind, Region, Tag};
use crate::model::{Position, Span, TextSource};
use crate::util::text::{char_len, is_blank};

/// Cooperative cancellation flag, polled once per line
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Output of one complete parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRegions {
    pub regions: Vec<Region>,
    pub tags: Vec<Tag>,
}

/// Parse every line of `source`.
///
/// Returns `None` if `cancel` trips before the last line; partial results are
/// discarded.
pub fn parse<S, M>(source: &S, matcher: &M, cancel: &CancellationToken) -> Option<ParsedRegions>
where
    S: TextSource + ?Sized,
    M: MatchLine + ?Sized,
{
    // Starts waiting for their end marker, as tags (same shape)
    let mut unpaired: Vec<Tag> = Vec::new();
    let mut parsed = ParsedRegions::default();
    let line_count = source.line_count();

    for line_idx in 0..line_count {
        if cancel.is_cancelled() {
            tracing::debug!("Region parse cancelled at line {}/{}", line_idx, line_count);
            return None;
        }

        let text = source.line(line_idx);
        if is_blank(&text) {
            continue;
        }
        let Some(found) = matcher.match_line(&text, line_idx) else {
            continue;
        };
        let line_span = Span::new(
            Position::new(line_idx, 0),
            Position::new(line_idx, char_len(&text)),
        );

        match found.kind {
            MatchKind::RegionStart | MatchKind::Tag => {
                // A start or tag without a name declares nothing
                let Some(name) = found.name else {
                    continue;
                };
                let entry = Tag {
                    key: found.key,
                    name,
                    description: found.description,
                    line: line_span,
                };
                if found.kind == MatchKind::Tag {
                    parsed.tags.push(entry);
                } else {
                    unpaired.push(entry);
                }
            }
            MatchKind::RegionEnd => {
                let start_idx = match &found.name {
                    Some(name) => unpaired.iter().rposition(|start| start.name.text == name.text),
                    None => unpaired.len().checked_sub(1),
                };
                let Some(start_idx) = start_idx else {
                    continue;
                };
                let start = unpaired.remove(start_idx);
                parsed.regions.push(Region {
                    key: start.key,
                    key_end: found.key,
                    name: start.name,
                    name_end: found.name,
                    description: start.description,
                    start: start.line,
                    end: line_span,
                });
            }
        }
    }

    tracing::debug!(
        lines = line_count,
        regions = parsed.regions.len(),
        tags = parsed.tags.len(),
        dropped = unpaired.len(),
        "Parsed region markers"
    );

    Some(parsed)
}
