//! # Block Parsing
//!
//! Two-phase parsing of a plain-text notebook into blocks.
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts (blank, marker, excluded).
//! 2. **Block Construction** (`builder`): a `BlockBuilder` consumes the
//!    classes in order and emits `Block`s as they open and close.
//!
//! ## Key Invariants
//!
//! - Blocks partition the non-blank lines; blank lines belong to no block
//! - A block's state and id come from the marker on its first line
//! - A single forward pass, no backtracking

pub mod builder;
pub mod classify;
pub mod marker;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineClassifier, is_excluded_line};
pub use marker::{Marker, MarkerEncoding, TOKEN, embed_marker, extract_marker, remove_marker};
pub use types::{Block, BlockState};

/// Splits a document into lines on `\n` only, so joining with `\n` is lossless.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Parses `text` into its ordered blocks.
///
/// An empty document yields no blocks.
pub fn parse_blocks(text: &str) -> Vec<Block<'_>> {
    let classifier = LineClassifier;
    let mut builder = BlockBuilder::new();

    for (index, line) in text.split('\n').enumerate() {
        let lc = classifier.classify(index, line);
        builder.push(&lc);
    }

    builder.finish()
}

/// The block containing line `index`, if any.
pub fn block_at<'b, 'a>(blocks: &'b [Block<'a>], index: usize) -> Option<&'b Block<'a>> {
    blocks.iter().find(|b| b.contains_line(index))
}
