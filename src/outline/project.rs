//! Outline projection from parsed regions and tags

use super::{FoldingSpan, OutlineData, OutlineKind, OutlineNode, OutlineRange, OutlineSymbol};
use crate::region::ParsedRegions;

/// Derive symbols and folding spans.
///
/// Symbols list every region in discovery order followed by every tag in
/// discovery order, so document order is not preserved across the two groups.
pub fn project(parsed: &ParsedRegions, revision: u64) -> OutlineData {
    let region_symbols = parsed.regions.iter().map(|region| OutlineSymbol {
        name: region.name.text.clone(),
        detail: region.description.as_ref().map(|d| d.text.clone()),
        kind: OutlineKind::Region,
        range: OutlineRange {
            start_line: region.start.start.line,
            start_col: region.start.start.column,
            end_line: region.end.end.line,
            end_col: region.end.end.column,
        },
        selection_range: region.name.span.into(),
    });

    let tag_symbols = parsed.tags.iter().map(|tag| OutlineSymbol {
        name: tag.name.text.clone(),
        detail: tag.description.as_ref().map(|d| d.text.clone()),
        kind: OutlineKind::Tag,
        range: tag.line.into(),
        selection_range: tag.name.span.into(),
    });

    let folding = parsed
        .regions
        .iter()
        .map(|region| FoldingSpan {
            start_line: region.start.start.line,
            end_line: region.end.end.line,
        })
        .collect();

    OutlineData {
        revision,
        symbols: region_symbols.chain(tag_symbols).collect(),
        folding,
    }
}

fn node_from_symbol(symbol: &OutlineSymbol) -> OutlineNode {
    OutlineNode {
        kind: symbol.kind,
        name: symbol.name.clone(),
        detail: symbol.detail.clone(),
        range: symbol.range,
        selection_range: symbol.selection_range,
        children: Vec::new(),
    }
}

/// Attach `finished` to the node below it on the stack, or to the roots
fn attach(stack: &mut [OutlineNode], roots: &mut Vec<OutlineNode>, finished: OutlineNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(finished),
        None => roots.push(finished),
    }
}

pub(super) fn build_tree_by_containment(symbols: &[OutlineSymbol]) -> Vec<OutlineNode> {
    let mut sorted: Vec<&OutlineSymbol> = symbols.iter().collect();

    // Parents before children: start ascending, end descending
    sorted.sort_by(|a, b| {
        (a.range.start_line, a.range.start_col)
            .cmp(&(b.range.start_line, b.range.start_col))
            .then((b.range.end_line, b.range.end_col).cmp(&(a.range.end_line, a.range.end_col)))
    });

    let mut roots: Vec<OutlineNode> = Vec::new();
    let mut stack: Vec<OutlineNode> = Vec::new();

    for symbol in sorted {
        // Pop nodes that don't contain this symbol
        while stack
            .last()
            .is_some_and(|top| !top.range.contains(&symbol.range))
        {
            if let Some(finished) = stack.pop() {
                attach(&mut stack, &mut roots, finished);
            }
        }
        stack.push(node_from_symbol(symbol));
    }

    // Flush remaining stack
    while let Some(finished) = stack.pop() {
        attach(&mut stack, &mut roots, finished);
    }

    roots
}
