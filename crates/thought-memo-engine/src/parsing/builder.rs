use super::{
    classify::LineClass,
    types::{Block, BlockState},
};

/// Block construction state machine (phase 2).
///
/// A blank line closes the open block. A marked line, or any non-blank line
/// when no block is open, starts a new one; other lines extend the open block.
pub struct BlockBuilder<'a> {
    open: Option<Block<'a>>,
    out: Vec<Block<'a>>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new() -> Self {
        Self {
            open: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass<'a>) {
        if c.is_blank {
            self.flush();
            return;
        }

        match self.open.as_mut() {
            Some(block) if c.marker.is_none() => {
                block.end_line = c.index;
                block.lines.push(c.text);
            }
            _ => self.start(c),
        }
    }

    pub fn finish(mut self) -> Vec<Block<'a>> {
        // EOF flush
        self.flush();
        self.out
    }

    fn start(&mut self, c: &LineClass<'a>) {
        self.flush();
        self.open = Some(Block {
            start_line: c.index,
            end_line: c.index,
            state: c.marker.map_or(BlockState::None, |m| m.state),
            id: c.marker.map(|m| m.id),
            lines: vec![c.text],
            excluded: c.is_excluded,
        });
    }

    fn flush(&mut self) {
        if let Some(block) = self.open.take() {
            self.out.push(block);
        }
    }
}

impl Default for BlockBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
