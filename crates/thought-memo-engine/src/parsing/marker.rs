//! Invisible line markers.
//!
//! A marker is `U+200B [ id : state ] U+200B` appended to the end of a line.
//! The same zero-width token opens and closes the marker, so detection keys on
//! the bracketed payload sitting immediately between two tokens.
//!
//! Both state encodings found in stored documents are read: the long form
//! (`normal` / `complete`) and the short form (`r` / `c`). A missing or empty
//! state segment reads as `normal`.

use std::borrow::Cow;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::types::BlockState;

/// Zero width space, used as both delimiters of a marker.
pub const TOKEN: char = '\u{200B}';

const CLOSE: &str = "]\u{200B}";

/// Which state tokens are written when a marker is embedded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerEncoding {
    /// `normal` / `complete`
    #[default]
    Long,
    /// `r` / `c`
    Short,
}

impl MarkerEncoding {
    /// Token for `state`, or `None` for [`BlockState::None`] which has no marker.
    pub fn state_token(self, state: BlockState) -> Option<&'static str> {
        match (self, state) {
            (_, BlockState::None) => None,
            (MarkerEncoding::Long, BlockState::Normal) => Some("normal"),
            (MarkerEncoding::Long, BlockState::Complete) => Some("complete"),
            (MarkerEncoding::Short, BlockState::Normal) => Some("r"),
            (MarkerEncoding::Short, BlockState::Complete) => Some("c"),
        }
    }
}

/// A decoded marker. `state` is never [`BlockState::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    pub id: &'a str,
    pub state: BlockState,
}

/// Byte ranges of a marker within its line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkerSpan {
    /// Whole marker, both tokens included.
    range: Range<usize>,
    /// Text between the brackets.
    payload: Range<usize>,
}

/// Decodes the marker of `line`, if it has a well-formed one.
///
/// Malformed payloads (empty id, unknown state token) read as no marker.
pub fn extract_marker(line: &str) -> Option<Marker<'_>> {
    let span = find_marker(line)?;
    decode_payload(&line[span.payload])
}

/// True when `line` contains marker syntax, well-formed or not.
pub fn has_marker_syntax(line: &str) -> bool {
    find_marker(line).is_some()
}

/// Strips every marker from `line`. All other content, whitespace included,
/// is left as it was.
pub fn remove_marker(line: &str) -> Cow<'_, str> {
    let Some(first) = find_marker(line) else {
        return Cow::Borrowed(line);
    };

    let mut out = line.to_string();
    let mut next = Some(first);
    while let Some(span) = next {
        out.replace_range(span.range, "");
        next = find_marker(&out);
    }
    Cow::Owned(out)
}

/// Replaces any marker on `line` with one encoding `(id, state)` at the line end.
///
/// Embedding [`BlockState::None`] only removes the existing marker.
pub fn embed_marker(line: &str, id: &str, state: BlockState, encoding: MarkerEncoding) -> String {
    let mut out = remove_marker(line).into_owned();
    if let Some(token) = encoding.state_token(state) {
        out.push(TOKEN);
        out.push('[');
        out.push_str(id);
        out.push(':');
        out.push_str(token);
        out.push(']');
        out.push(TOKEN);
    }
    out
}

/// Locates the rightmost marker by scanning back from each `]` + token pair.
fn find_marker(line: &str) -> Option<MarkerSpan> {
    let mut limit = line.len();
    while let Some(close) = line[..limit].rfind(CLOSE) {
        if let Some(span) = span_closing_at(line, close) {
            return Some(span);
        }
        limit = close;
    }
    None
}

fn span_closing_at(line: &str, close: usize) -> Option<MarkerSpan> {
    let head = &line[..close];
    // Nearest delimiter before the closing bracket must be the opening token.
    let open = head.rfind([TOKEN, ']'])?;
    if !head[open..].starts_with(TOKEN) {
        return None;
    }
    let bracket = open + TOKEN.len_utf8();
    if !head[bracket..].starts_with('[') {
        return None;
    }
    let payload = bracket + 1..close;
    if payload.is_empty() {
        return None;
    }
    Some(MarkerSpan {
        range: open..close + CLOSE.len(),
        payload,
    })
}

fn decode_payload(payload: &str) -> Option<Marker<'_>> {
    let mut parts = payload.split(':');
    let id = parts.next().filter(|id| !id.is_empty())?;
    let state = match parts.next().unwrap_or_default() {
        "" | "normal" | "r" => BlockState::Normal,
        "complete" | "c" => BlockState::Complete,
        other => {
            log::debug!("ignoring marker {id:?} with unknown state {other:?}");
            return None;
        }
    };
    Some(Marker { id, state })
}
