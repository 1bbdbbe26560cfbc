//! # Block Editing
//!
//! Whole-document operations built on [`crate::parsing`]. Every operation
//! takes the full text and returns a value; nothing is kept between calls
//! except what the caller holds in a [`BlockEngine`].
//!
//! - **`toggle`**: cycles one line's marker through `none -> normal -> complete`
//! - **`completion`**: extracts completed blocks and removes them from the text
//! - **`gutter`**: per-line indicators for the presentation layer
//! - **`ids`**: the [`IdSource`] seam for new block ids

pub mod completion;
pub mod gutter;
pub mod ids;
pub mod toggle;

pub use completion::{CompletedBlock, extract_completed_blocks, remove_completed_blocks, split_category};
pub use gutter::{GutterLine, gutter, gutter_symbol};
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use toggle::toggle_block_state;

use crate::parsing::{Block, MarkerEncoding, parse_blocks};

/// Caller-owned bundle of marker encoding and id source.
#[derive(Debug, Clone, Default)]
pub struct BlockEngine<I: IdSource = RandomIds> {
    encoding: MarkerEncoding,
    ids: I,
}

impl BlockEngine<RandomIds> {
    pub fn new(encoding: MarkerEncoding) -> Self {
        Self::with_ids(encoding, RandomIds)
    }
}

impl<I: IdSource> BlockEngine<I> {
    pub fn with_ids(encoding: MarkerEncoding, ids: I) -> Self {
        Self { encoding, ids }
    }

    pub fn encoding(&self) -> MarkerEncoding {
        self.encoding
    }

    pub fn parse<'a>(&self, text: &'a str) -> Vec<Block<'a>> {
        parse_blocks(text)
    }

    pub fn toggle(&mut self, text: &str, line_index: usize) -> String {
        toggle_block_state(text, line_index, self.encoding, &mut self.ids)
    }

    pub fn extract_completed(&self, text: &str) -> Vec<CompletedBlock> {
        extract_completed_blocks(text)
    }

    pub fn remove_completed(&self, text: &str) -> String {
        remove_completed_blocks(text)
    }

    pub fn gutter(&self, text: &str) -> Vec<GutterLine> {
        gutter(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::BlockState;
    use pretty_assertions::assert_eq;

    fn engine() -> BlockEngine<SequentialIds> {
        BlockEngine::with_ids(MarkerEncoding::Long, SequentialIds::new("blk"))
    }

    #[test]
    fn scenario_toggle_single_line() {
        let mut engine = engine();
        let text = "Buy milk".to_string();

        let blocks = engine.parse(&text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].state, BlockState::None);

        let text = engine.toggle(&text, 0);
        assert_eq!(engine.parse(&text)[0].state, BlockState::Normal);
        assert_eq!(engine.gutter(&text)[0].symbol, "▶");

        let text = engine.toggle(&text, 0);
        assert_eq!(engine.parse(&text)[0].state, BlockState::Complete);
        assert_eq!(engine.gutter(&text)[0].symbol, "✓");

        let text = engine.toggle(&text, 0);
        assert_eq!(text, "Buy milk");
        assert_eq!(engine.parse(&text)[0].state, BlockState::None);
    }

    #[test]
    fn scenario_excluded_block() {
        let mut engine = engine();
        let text = "-- note\nsomething";

        assert!(engine.parse(text)[0].excluded);
        assert_eq!(engine.toggle(text, 0), text);
    }

    #[test]
    fn scenario_category_extraction() {
        let mut engine = engine();
        let text = engine.toggle("groceries Buy milk", 0);
        let text = engine.toggle(&text, 0);

        let done = engine.extract_completed(&text);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].category.as_deref(), Some("groceries"));
        assert_eq!(done[0].text, "Buy milk");
    }

    #[test]
    fn scenario_remove_completed() {
        let mut engine = engine();
        let text = "groceries Buy milk\n\nCall Bob\nat noon";
        let text = engine.toggle(text, 0);
        let text = engine.toggle(&text, 0);
        let text = engine.toggle(&text, 2);

        let remaining = engine.remove_completed(&text);
        assert_eq!(
            remaining,
            "Call Bob\u{200B}[blk-2:normal]\u{200B}\nat noon"
        );
    }

    #[test]
    fn default_engine_writes_long_markers() {
        let mut engine = BlockEngine::new(MarkerEncoding::default());
        let text = engine.toggle("task", 0);
        assert!(text.ends_with(":normal]\u{200B}"));
        assert_eq!(engine.encoding(), MarkerEncoding::Long);
    }
}
