use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::notebook::NotebookId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(pub Uuid);

impl LogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A completed block moved out of its notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogId,
    /// Notebook the block was completed in.
    pub notebook_id: NotebookId,
    /// Block text, prefixed with `"<category> - "` when it had a category.
    pub text: String,
    pub completed_at: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        notebook_id: NotebookId,
        text: &str,
        category: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LogId::new(),
            notebook_id,
            text: Self::format_text(text, category),
            completed_at,
        }
    }

    pub fn format_text(text: &str, category: Option<&str>) -> String {
        match category {
            Some(category) => format!("{category} - {text}"),
            None => text.to_string(),
        }
    }

    /// First line of the entry text.
    pub fn headline(&self) -> &str {
        self.text.split('\n').next().unwrap_or_default()
    }
}
