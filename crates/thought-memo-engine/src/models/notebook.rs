use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parsing::remove_marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotebookId(pub Uuid);

impl NotebookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotebookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One note pad: a plain-text document plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    /// Document text, markers included.
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Position in the notebook list, 0 first.
    #[serde(default)]
    pub order: usize,
}

impl Notebook {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: NotebookId::new(),
            content: String::new(),
            created_at: now,
            updated_at: now,
            order: 0,
        }
    }

    /// First line with markers stripped, trimmed. Empty for an empty notebook.
    pub fn title(&self) -> String {
        let first = self.content.split('\n').next().unwrap_or_default();
        remove_marker(first).trim().to_string()
    }
}
