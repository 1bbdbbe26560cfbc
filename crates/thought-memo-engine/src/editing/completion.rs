use serde::Serialize;

use crate::parsing::{parse_blocks, remove_marker, split_lines};

/// A completed block ready to be appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedBlock {
    /// Marker-free text with the category token taken off the first line.
    pub text: String,
    /// Leading token of the first line, when it has at least two tokens.
    pub category: Option<String>,
    /// Marker-free block text before category extraction.
    pub original_text: String,
}

/// Collects every complete, non-excluded block in document order.
pub fn extract_completed_blocks(text: &str) -> Vec<CompletedBlock> {
    parse_blocks(text)
        .iter()
        .filter(|b| b.is_completable())
        .map(|b| {
            let original_text = b
                .lines
                .iter()
                .map(|l| remove_marker(l))
                .collect::<Vec<_>>()
                .join("\n");
            let (category, text) = split_category(&original_text);
            CompletedBlock {
                text,
                category,
                original_text,
            }
        })
        .collect()
}

/// Splits the leading whitespace-delimited token off the first line.
///
/// With fewer than two tokens on the first line there is no category and the
/// text comes back as given.
pub fn split_category(text: &str) -> (Option<String>, String) {
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (text, None),
    };

    let tokens: Vec<&str> = first.split_whitespace().collect();
    let [category, remainder @ ..] = tokens.as_slice() else {
        return (None, text.to_string());
    };
    if remainder.is_empty() {
        return (None, text.to_string());
    }

    let mut body = remainder.join(" ");
    if let Some(rest) = rest {
        body.push('\n');
        body.push_str(rest);
    }
    (Some(category.to_string()), body.trim().to_string())
}

/// Deletes the lines of every complete, non-excluded block.
///
/// All other lines, blank ones included, are kept in order; the result is
/// trimmed.
pub fn remove_completed_blocks(text: &str) -> String {
    let lines = split_lines(text);
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut cursor = 0;

    for block in parse_blocks(text).iter().filter(|b| b.is_completable()) {
        kept.extend_from_slice(&lines[cursor..block.start_line]);
        cursor = block.end_line + 1;
    }
    kept.extend_from_slice(&lines[cursor..]);

    kept.join("\n").trim().to_string()
}
