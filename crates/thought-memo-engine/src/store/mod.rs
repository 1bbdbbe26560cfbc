//! Notebook and completion-log persistence.
//!
//! All data lives as one JSON document under [`STORAGE_KEY`]. Every operation
//! reads the whole document, changes it and writes it back, so callers keep
//! to one edit session per store at a time.

use chrono::Utc;

use crate::editing::{BlockEngine, IdSource};
use crate::io::{IoError, KeyValueStore};
use crate::models::{DATA_VERSION, LogEntry, LogId, MemoData, Notebook, NotebookId};

pub const STORAGE_KEY: &str = "thoughtMemo";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Io(#[from] IoError),
    #[error("Stored data is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("Failed to encode data: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Notebook not found: {0}")]
    NotebookNotFound(NotebookId),
    #[error("Log entry not found: {0}")]
    LogNotFound(LogId),
}

pub struct MemoStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> MemoStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the stored document, or the initial one when nothing is stored.
    pub fn load(&self) -> Result<MemoData, StoreError> {
        let Some(raw) = self.backend.get(STORAGE_KEY)? else {
            return Ok(MemoData::default());
        };
        let data: MemoData = serde_json::from_str(&raw).map_err(StoreError::Corrupt)?;
        if data.version != DATA_VERSION {
            log::warn!(
                "data version {} differs from {DATA_VERSION}; migration may be needed",
                data.version
            );
        }
        Ok(data)
    }

    pub fn save(&mut self, data: &MemoData) -> Result<(), StoreError> {
        let raw = serde_json::to_string(data).map_err(StoreError::Encode)?;
        self.backend.set(STORAGE_KEY, &raw)?;
        Ok(())
    }

    /// Creates an empty notebook at the top of the list.
    pub fn create_notebook(&mut self) -> Result<Notebook, StoreError> {
        let mut data = self.load()?;
        let notebook = Notebook::new(Utc::now());
        data.notebooks.insert(0, notebook.clone());
        data.renumber();
        self.save(&data)?;

        log::info!("created notebook {}", notebook.id);
        Ok(notebook)
    }

    /// Replaces a notebook's content. Returns false if it does not exist.
    pub fn update_notebook(&mut self, id: NotebookId, content: &str) -> Result<bool, StoreError> {
        let mut data = self.load()?;
        let Some(notebook) = data.notebook_mut(id) else {
            return Ok(false);
        };
        notebook.content = content.to_string();
        notebook.updated_at = Utc::now();
        self.save(&data)?;
        Ok(true)
    }

    pub fn delete_notebook(&mut self, id: NotebookId) -> Result<bool, StoreError> {
        let mut data = self.load()?;
        let Some(index) = data.notebooks.iter().position(|n| n.id == id) else {
            return Ok(false);
        };
        data.notebooks.remove(index);
        data.renumber();
        self.save(&data)?;

        log::info!("deleted notebook {id}");
        Ok(true)
    }

    /// Puts the listed notebooks first, in the given order.
    ///
    /// Unknown ids are ignored. Notebooks not listed follow in their previous
    /// order.
    pub fn reorder_notebooks(&mut self, ids: &[NotebookId]) -> Result<(), StoreError> {
        let mut data = self.load()?;
        data.notebooks.sort_by_key(|n| n.order);

        let mut rest = std::mem::take(&mut data.notebooks);
        for id in ids {
            if let Some(index) = rest.iter().position(|n| n.id == *id) {
                data.notebooks.push(rest.remove(index));
            }
        }
        data.notebooks.append(&mut rest);
        data.renumber();
        self.save(&data)
    }

    /// Moves a notebook `delta` places, clamped to the list bounds.
    pub fn move_notebook(&mut self, id: NotebookId, delta: isize) -> Result<bool, StoreError> {
        let mut ids: Vec<NotebookId> = self.notebooks()?.iter().map(|n| n.id).collect();
        let Some(from) = ids.iter().position(|n| *n == id) else {
            return Ok(false);
        };
        let to = from.saturating_add_signed(delta).min(ids.len() - 1);
        if to == from {
            return Ok(false);
        }
        let moved = ids.remove(from);
        ids.insert(to, moved);
        self.reorder_notebooks(&ids)?;
        Ok(true)
    }

    pub fn notebook(&self, id: NotebookId) -> Result<Option<Notebook>, StoreError> {
        Ok(self.load()?.notebooks.into_iter().find(|n| n.id == id))
    }

    /// All notebooks, sorted by `order`.
    pub fn notebooks(&self) -> Result<Vec<Notebook>, StoreError> {
        let mut notebooks = self.load()?.notebooks;
        notebooks.sort_by_key(|n| n.order);
        Ok(notebooks)
    }

    /// Prepends a completion log entry.
    pub fn add_log(
        &mut self,
        notebook_id: NotebookId,
        text: &str,
        category: Option<&str>,
    ) -> Result<LogEntry, StoreError> {
        let mut data = self.load()?;
        let entry = LogEntry::new(notebook_id, text, category, Utc::now());
        data.logs.insert(0, entry.clone());
        self.save(&data)?;
        Ok(entry)
    }

    /// Removes a log entry and returns it.
    pub fn delete_log(&mut self, id: LogId) -> Result<Option<LogEntry>, StoreError> {
        let mut data = self.load()?;
        let Some(index) = data.logs.iter().position(|l| l.id == id) else {
            return Ok(None);
        };
        let entry = data.logs.remove(index);
        self.save(&data)?;
        Ok(Some(entry))
    }

    /// Completion log, newest first.
    pub fn logs(&self) -> Result<Vec<LogEntry>, StoreError> {
        Ok(self.load()?.logs)
    }

    /// Moves a log entry back to the end of its notebook.
    ///
    /// The entry is kept when its notebook no longer exists.
    pub fn restore_log(&mut self, id: LogId) -> Result<NotebookId, StoreError> {
        let mut data = self.load()?;
        let index = data
            .logs
            .iter()
            .position(|l| l.id == id)
            .ok_or(StoreError::LogNotFound(id))?;
        let notebook_id = data.logs[index].notebook_id;
        let text = data.logs[index].text.clone();

        let notebook = data
            .notebook_mut(notebook_id)
            .ok_or(StoreError::NotebookNotFound(notebook_id))?;
        if !notebook.content.trim().is_empty() {
            notebook.content.push_str("\n\n");
        }
        notebook.content.push_str(&text);
        notebook.updated_at = Utc::now();

        data.logs.remove(index);
        self.save(&data)?;

        log::info!("restored log {id} into notebook {notebook_id}");
        Ok(notebook_id)
    }

    /// Moves every completed block of a notebook into the log.
    ///
    /// Returns how many blocks were completed; with none the notebook is left
    /// untouched.
    pub fn complete_notebook<I: IdSource>(
        &mut self,
        id: NotebookId,
        engine: &BlockEngine<I>,
    ) -> Result<usize, StoreError> {
        let mut data = self.load()?;
        let notebook = data
            .notebook_mut(id)
            .ok_or(StoreError::NotebookNotFound(id))?;

        let completed = engine.extract_completed(&notebook.content);
        if completed.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        notebook.content = engine.remove_completed(&notebook.content);
        notebook.updated_at = now;

        for block in &completed {
            let entry = LogEntry::new(id, &block.text, block.category.as_deref(), now);
            data.logs.insert(0, entry);
        }
        self.save(&data)?;

        log::info!("completed {} block(s) in notebook {id}", completed.len());
        Ok(completed.len())
    }
}
