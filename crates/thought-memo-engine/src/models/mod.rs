pub mod log_entry;
pub mod notebook;

pub use log_entry::{LogEntry, LogId};
pub use notebook::{Notebook, NotebookId};

use serde::{Deserialize, Serialize};

/// Version written by this crate.
pub const DATA_VERSION: u32 = 1;

/// Everything persisted under one storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoData {
    pub version: u32,
    #[serde(default)]
    pub notebooks: Vec<Notebook>,
    /// Newest first.
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl Default for MemoData {
    fn default() -> Self {
        Self {
            version: DATA_VERSION,
            notebooks: vec![],
            logs: vec![],
        }
    }
}

impl MemoData {
    pub fn notebook_mut(&mut self, id: NotebookId) -> Option<&mut Notebook> {
        self.notebooks.iter_mut().find(|n| n.id == id)
    }

    /// Rewrites `order` to match vector position.
    pub(crate) fn renumber(&mut self) {
        for (index, notebook) in self.notebooks.iter_mut().enumerate() {
            notebook.order = index;
        }
    }
}
