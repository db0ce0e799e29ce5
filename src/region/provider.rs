//! Region provider - memoized parse state plus the editor-facing queries
//!
//! Holds the last successful parse of one document and answers symbol,
//! folding, rename and decoration requests from it. A re-parse only happens
//! when the document's version changes.

use super::matcher::{LineMatcher, MatchLine};
use super::parser::{parse, CancellationToken, ParsedRegions};
use super::{Markers, Region, Tag, Token};
use crate::config::RegionConfig;
use crate::model::{DocumentVersion, Position, Span, TextSource};
use crate::outline::{project, FoldingSpan, OutlineData, OutlineSymbol};

/// Rename could not proceed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    /// The position is not on a region or tag name
    NoSymbolAtPosition(Position),
}

impl std::fmt::Display for RenameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSymbolAtPosition(pos) => write!(
                f,
                "No region or tag found at line {}, column {}",
                pos.line + 1,
                pos.column + 1
            ),
        }
    }
}

impl std::error::Error for RenameError {}

/// A single text replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

/// What a rename at a given position would touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    /// The name span under the cursor
    pub range: Span,
    /// Current name text
    pub placeholder: String,
    /// Every span that must be replaced (start name, then end name if any)
    pub spans: Vec<Span>,
}

impl RenameTarget {
    pub fn edits_for(&self, new_name: &str) -> Vec<TextEdit> {
        self.spans
            .iter()
            .map(|span| TextEdit {
                span: *span,
                new_text: new_name.to_string(),
            })
            .collect()
    }
}

/// A decorated span, with an optional hover text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub span: Span,
    pub hover: Option<String>,
}

/// Decorated spans grouped by token role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorations {
    pub keys: Vec<Decoration>,
    pub names: Vec<Decoration>,
    pub descriptions: Vec<Decoration>,
}

fn hover_text(key: &Token, name: &Token, description: Option<&Token>) -> String {
    format!(
        "{} **{}** {}",
        key.text,
        name.text,
        description.map(|d| d.text.as_str()).unwrap_or("")
    )
}

fn plain(span: Span) -> Decoration {
    Decoration { span, hover: None }
}

/// Memoized region/tag state for one document at a time
pub struct RegionProvider<M: MatchLine = LineMatcher> {
    matcher: M,
    /// Version of the last completed parse
    version: Option<DocumentVersion>,
    parsed: ParsedRegions,
    outline: OutlineData,
    /// When false, `update` parses nothing and every query comes back empty
    enabled: bool,
    /// When false, `decorations` returns no spans
    highlight: bool,
}

impl RegionProvider<LineMatcher> {
    pub fn new(markers: &Markers) -> Self {
        Self::with_matcher(LineMatcher::new(markers))
    }

    /// Provider using the config's markers and its `enabled`/`highlight` flags
    pub fn from_config(config: &RegionConfig) -> Self {
        let mut provider = Self::new(&config.markers());
        provider.enabled = config.enabled;
        provider.highlight = config.highlight;
        provider
    }

    /// Apply a reloaded config: markers and both flags
    pub fn apply_config(&mut self, config: &RegionConfig) {
        self.set_markers(&config.markers());
        self.set_enabled(config.enabled);
        self.highlight = config.highlight;
    }

    /// Swap the markers. The next `update` re-parses unconditionally.
    pub fn set_markers(&mut self, markers: &Markers) {
        if self.matcher.markers() != markers {
            tracing::debug!("Region markers changed, invalidating parse");
            self.matcher = LineMatcher::new(markers);
            self.version = None;
        }
    }
}

impl<M: MatchLine> RegionProvider<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            matcher,
            version: None,
            parsed: ParsedRegions::default(),
            outline: OutlineData::default(),
            enabled: true,
            highlight: true,
        }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn parsing on or off. Disabling drops the current state.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            tracing::debug!("Region parsing {}", if enabled { "enabled" } else { "disabled" });
            self.enabled = enabled;
            self.clear();
        }
    }

    pub fn highlight(&self) -> bool {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: bool) {
        self.highlight = highlight;
    }

    /// Re-parse `source` if its version differs from the last parse.
    ///
    /// Returns true if the state was replaced. A cancelled parse leaves the
    /// previous state untouched and does not record the new version. A
    /// disabled provider never parses and always returns false.
    pub fn update<S: TextSource + ?Sized>(&mut self, source: &S, cancel: &CancellationToken) -> bool {
        if !self.enabled {
            return false;
        }
        let version = source.version();
        if self.version == Some(version) {
            return false;
        }

        let Some(parsed) = parse(source, &self.matcher, cancel) else {
            return false;
        };

        self.outline = project(&parsed, version.revision);
        self.parsed = parsed;
        self.version = Some(version);
        true
    }

    /// Forget everything, including the memoized version
    pub fn clear(&mut self) {
        self.version = None;
        self.parsed = ParsedRegions::default();
        self.outline = OutlineData::default();
    }

    pub fn version(&self) -> Option<DocumentVersion> {
        self.version
    }

    pub fn regions(&self) -> &[Region] {
        &self.parsed.regions
    }

    pub fn tags(&self) -> &[Tag] {
        &self.parsed.tags
    }

    pub fn outline(&self) -> &OutlineData {
        &self.outline
    }

    pub fn document_symbols(&self) -> &[OutlineSymbol] {
        &self.outline.symbols
    }

    pub fn folding_ranges(&self) -> &[FoldingSpan] {
        &self.outline.folding
    }

    /// Find the name under `position`.
    ///
    /// Regions are checked before tags; a region's start name before its end
    /// name.
    pub fn prepare_rename(&self, position: Position) -> Result<RenameTarget, RenameError> {
        for region in &self.parsed.regions {
            let mut spans = vec![region.name.span];
            spans.extend(region.name_end.as_ref().map(|t| t.span));

            if region.name.span.contains(position) {
                return Ok(RenameTarget {
                    range: region.name.span,
                    placeholder: region.name.text.clone(),
                    spans,
                });
            }
            if let Some(name_end) = region
                .name_end
                .as_ref()
                .filter(|t| t.span.contains(position))
            {
                return Ok(RenameTarget {
                    range: name_end.span,
                    placeholder: name_end.text.clone(),
                    spans,
                });
            }
        }

        self.parsed
            .tags
            .iter()
            .find(|tag| tag.name.span.contains(position))
            .map(|tag| RenameTarget {
                range: tag.name.span,
                placeholder: tag.name.text.clone(),
                spans: vec![tag.name.span],
            })
            .ok_or(RenameError::NoSymbolAtPosition(position))
    }

    /// Edits renaming the name under `position` to `new_name`
    pub fn rename_edits(
        &self,
        position: Position,
        new_name: &str,
    ) -> Result<Vec<TextEdit>, RenameError> {
        Ok(self.prepare_rename(position)?.edits_for(new_name))
    }

    /// Key, name and description spans for highlighting
    pub fn decorations(&self) -> Decorations {
        let mut decorations = Decorations::default();
        if !self.highlight {
            return decorations;
        }

        for region in &self.parsed.regions {
            decorations.keys.push(plain(region.key.span));
            decorations.keys.push(plain(region.key_end.span));

            let hover = hover_text(&region.key, &region.name, region.description.as_ref());
            decorations.names.push(Decoration {
                span: region.name.span,
                hover: Some(hover.clone()),
            });
            if let Some(name_end) = &region.name_end {
                decorations.names.push(Decoration {
                    span: name_end.span,
                    hover: Some(hover),
                });
            }
            if let Some(description) = &region.description {
                decorations.descriptions.push(plain(description.span));
            }
        }

        for tag in &self.parsed.tags {
            decorations.keys.push(plain(tag.key.span));
            decorations.names.push(Decoration {
                span: tag.name.span,
                hover: Some(hover_text(&tag.key, &tag.name, tag.description.as_ref())),
            });
            if let Some(description) = &tag.description {
                decorations.descriptions.push(plain(description.span));
            }
        }

        decorations
    }
}
