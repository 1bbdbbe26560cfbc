use serde::Serialize;

use crate::parsing::{BlockState, is_excluded_line, parse_blocks, split_lines};

/// What the presentation layer shows beside one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GutterLine {
    pub index: usize,
    /// First line of a block.
    pub block_start: bool,
    /// State of the containing block; `None` for blank lines.
    pub state: BlockState,
    /// The line itself starts with `--`.
    pub excluded: bool,
    /// Indicator glyph, only ever set on block starts.
    pub symbol: &'static str,
}

/// Glyph for a block state. Excluded lines never show one.
pub fn gutter_symbol(state: BlockState, excluded: bool) -> &'static str {
    if excluded {
        return "";
    }
    match state {
        BlockState::Normal => "▶",
        BlockState::Complete => "✓",
        BlockState::None => "",
    }
}

/// One [`GutterLine`] per document line, in order.
pub fn gutter(text: &str) -> Vec<GutterLine> {
    let blocks = parse_blocks(text);
    let mut blocks = blocks.iter().peekable();
    let mut out = Vec::new();

    for (index, line) in split_lines(text).into_iter().enumerate() {
        while blocks.next_if(|b| b.end_line < index).is_some() {}
        let block = blocks.peek().filter(|b| b.contains_line(index));

        let excluded = is_excluded_line(line);
        let block_start = block.is_some_and(|b| b.start_line == index);
        let state = block.map_or(BlockState::None, |b| b.state);

        out.push(GutterLine {
            index,
            block_start,
            state,
            excluded,
            symbol: if block_start {
                gutter_symbol(state, excluded)
            } else {
                ""
            },
        });
    }

    out
}
