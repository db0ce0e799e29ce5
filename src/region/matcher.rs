//! Single-line marker matching
//!
//! Each marker is turned into a regex once, when the matcher is built:
//!
//! - start / tag: `<marker>[\t ]+(?P<name>\S*)[\t ]*(?P<description>.*)`
//! - end: `<marker>([\t ]+(?P<name>\S*))?`
//!
//! Patterns are tried start, end, tag; the first hit wins.

use regex::{Captures, Regex};

use super::{Markers, MatchKind, RegionMatch, Token, TokenKind};
use crate::model::Span;
use crate::util::text::{byte_to_char_col, char_len, has_regex_metachars};

const NAMED_SUFFIX: &str = r"[\t ]+(?P<name>\S*)[\t ]*(?P<description>.*)";
const END_SUFFIX: &str = r"([\t ]+(?P<name>\S*))?";

/// Anything that can turn one line into at most one marker match
pub trait MatchLine {
    fn match_line(&self, line: &str, line_number: usize) -> Option<RegionMatch>;
}

/// A compiled marker pattern together with the marker it was built from
#[derive(Debug, Clone)]
struct MarkerPattern {
    marker: String,
    marker_len: usize,
    regex: Option<Regex>,
}

impl MarkerPattern {
    fn build(marker: &str, escape: bool, suffix: &str) -> Self {
        let prefix = if escape {
            regex::escape(marker)
        } else {
            marker.to_string()
        };
        let regex = match Regex::new(&format!("{prefix}{suffix}")) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!("Marker {:?} does not form a valid pattern: {}", marker, e);
                None
            }
        };
        Self {
            marker: marker.to_string(),
            marker_len: char_len(marker),
            regex,
        }
    }

    fn captures<'l>(&self, line: &'l str) -> Option<Captures<'l>> {
        self.regex.as_ref()?.captures(line)
    }
}

/// Line matcher for one set of markers
#[derive(Debug, Clone)]
pub struct LineMatcher {
    markers: Markers,
    start: MarkerPattern,
    end: MarkerPattern,
    tag: MarkerPattern,
}

impl LineMatcher {
    pub fn new(markers: &Markers) -> Self {
        if !markers.escape {
            for marker in [&markers.start, &markers.end, &markers.tag] {
                if has_regex_metachars(marker) {
                    tracing::warn!(
                        "Marker {:?} contains regex metacharacters and is used as a pattern; \
                         set escape_markers to match it literally",
                        marker
                    );
                }
            }
        }

        Self {
            markers: markers.clone(),
            start: MarkerPattern::build(&markers.start, markers.escape, NAMED_SUFFIX),
            end: MarkerPattern::build(&markers.end, markers.escape, END_SUFFIX),
            tag: MarkerPattern::build(&markers.tag, markers.escape, NAMED_SUFFIX),
        }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }
}

impl MatchLine for LineMatcher {
    fn match_line(&self, line: &str, line_number: usize) -> Option<RegionMatch> {
        [
            (&self.start, MatchKind::RegionStart),
            (&self.end, MatchKind::RegionEnd),
            (&self.tag, MatchKind::Tag),
        ]
        .into_iter()
        .find_map(|(pattern, kind)| {
            pattern
                .captures(line)
                .map(|caps| tokens(&caps, pattern, line, line_number, kind))
        })
    }
}

/// Split a successful match into key/name/description tokens.
///
/// The key always sits at the start of the match. The name capture follows the
/// key, and the description capture is the tail of the match, so the capture
/// offsets are used directly.
fn tokens(
    caps: &Captures<'_>,
    pattern: &MarkerPattern,
    line: &str,
    line_number: usize,
    kind: MatchKind,
) -> RegionMatch {
    let key_col = caps
        .get(0)
        .map(|m| byte_to_char_col(line, m.start()))
        .unwrap_or(0);
    let key = Token::new(
        TokenKind::Key,
        pattern.marker.clone(),
        Span::on_line(line_number, key_col, key_col + pattern.marker_len),
    );

    let capture_token = |group: &str, token_kind: TokenKind| {
        caps.name(group).filter(|m| !m.as_str().is_empty()).map(|m| {
            Token::new(
                token_kind,
                m.as_str(),
                Span::on_line(
                    line_number,
                    byte_to_char_col(line, m.start()),
                    byte_to_char_col(line, m.end()),
                ),
            )
        })
    };

    let name = capture_token("name", TokenKind::Name);
    // No description without a name
    let description = name
        .as_ref()
        .and_then(|_| capture_token("description", TokenKind::Description));

    RegionMatch {
        kind,
        key,
        name,
        description,
    }
}
