use serde::{Deserialize, Serialize};

/// Lifecycle state of a block, carried by the marker on its first line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockState {
    /// No marker.
    #[default]
    None,
    /// Marked, shown as `▶`.
    Normal,
    /// Marked done, shown as `✓`. Eligible for completion.
    Complete,
}

impl BlockState {
    /// The state reached by one toggle.
    pub fn next(self) -> Self {
        match self {
            BlockState::None => BlockState::Normal,
            BlockState::Normal => BlockState::Complete,
            BlockState::Complete => BlockState::None,
        }
    }
}

/// A maximal run of non-blank lines treated as one unit with one state.
///
/// Lines borrow from the parsed document and still contain their markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Zero-based index of the first line.
    pub start_line: usize,
    /// Zero-based index of the last line (inclusive).
    pub end_line: usize,
    pub state: BlockState,
    /// Marker id from the first line, if it carries one.
    pub id: Option<&'a str>,
    /// Raw lines, markers included.
    pub lines: Vec<&'a str>,
    /// First line starts with `--`.
    pub excluded: bool,
}

impl Block<'_> {
    pub fn contains_line(&self, index: usize) -> bool {
        (self.start_line..=self.end_line).contains(&index)
    }

    /// True for blocks that completion extracts and removes.
    pub fn is_completable(&self) -> bool {
        self.state == BlockState::Complete && !self.excluded
    }
}
