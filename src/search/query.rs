//! Search queries and their compiled predicates
//!
//! A pattern containing an uppercase character is matched case-sensitively,
//! otherwise case-insensitively, in every mode.

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// How the pattern is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Plain substring
    Literal,
    /// Regular expression
    Regex,
    /// Ordered, possibly non-contiguous subsequence
    Fuzzy,
}

impl SearchMode {
    /// Mode selected by the first character typed into the search input
    pub fn from_prefix(ch: char) -> Option<Self> {
        match ch {
            '/' => Some(SearchMode::Literal),
            '=' => Some(SearchMode::Regex),
            '?' => Some(SearchMode::Fuzzy),
            _ => None,
        }
    }

    pub fn prefix(&self) -> char {
        match self {
            SearchMode::Literal => '/',
            SearchMode::Regex => '=',
            SearchMode::Fuzzy => '?',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub pattern: String,
    pub mode: SearchMode,
    /// Only nodes of this kind may match
    pub kind_filter: Option<String>,
}

impl Query {
    pub fn new(pattern: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            pattern: pattern.into(),
            mode,
            kind_filter: None,
        }
    }

    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::new(pattern, SearchMode::Literal)
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(pattern, SearchMode::Regex)
    }

    pub fn fuzzy(pattern: impl Into<String>) -> Self {
        Self::new(pattern, SearchMode::Fuzzy)
    }

    pub fn with_kind_filter(mut self, kind: impl Into<String>) -> Self {
        self.kind_filter = Some(kind.into());
        self
    }

    /// Parse raw search input: an optional mode prefix followed by the pattern.
    ///
    /// Input without a prefix is a literal search. Returns `None` for empty input.
    pub fn parse_input(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let first = chars.next()?;
        match SearchMode::from_prefix(first) {
            Some(mode) => Some(Self::new(chars.as_str(), mode)),
            None => Some(Self::literal(input)),
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.pattern.to_lowercase() != self.pattern
    }

    /// Whether a walk for this query may reuse the match state left by
    /// `previous`.
    ///
    /// True only when every node rejected by `previous` is guaranteed to be
    /// rejected by `self`: same mode (never regex), same kind filter, and a
    /// pattern that grows `previous` at the end.
    pub fn extends(&self, previous: &Query) -> bool {
        self.mode == previous.mode
            && self.mode != SearchMode::Regex
            && self.kind_filter == previous.kind_filter
            && self.pattern.starts_with(&previous.pattern)
    }

    /// Compile into a predicate. `None` for an empty pattern.
    pub fn compile(&self) -> Option<Predicate> {
        if self.pattern.is_empty() {
            return None;
        }
        let case_insensitive = !self.is_case_sensitive();

        let predicate = match self.mode {
            SearchMode::Literal if !case_insensitive => Predicate::Literal {
                needle: self.pattern.clone(),
            },
            SearchMode::Literal => build(&regex::escape(&self.pattern), case_insensitive),
            SearchMode::Regex => build(&self.pattern, case_insensitive),
            SearchMode::Fuzzy => {
                let source = self
                    .pattern
                    .chars()
                    .map(|ch| regex::escape(ch.encode_utf8(&mut [0; 4])))
                    .collect::<Vec<_>>()
                    .join(".*?");
                build(&source, case_insensitive)
            }
        };
        Some(predicate)
    }
}

fn build(source: &str, case_insensitive: bool) -> Predicate {
    match RegexBuilder::new(source)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(regex) => Predicate::Pattern(regex),
        Err(e) => {
            tracing::debug!("Search pattern {:?} does not compile: {}", source, e);
            Predicate::Never
        }
    }
}

/// A compiled query
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Case-sensitive substring
    Literal { needle: String },
    Pattern(Regex),
    /// The query failed to compile; nothing matches
    Never,
}

impl Predicate {
    /// Byte range of the first match in `text`
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        match self {
            Predicate::Literal { needle } => text
                .find(needle.as_str())
                .map(|start| start..start + needle.len()),
            Predicate::Pattern(regex) => regex.find(text).map(|m| m.range()),
            Predicate::Never => None,
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}
