use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use thought_memo_engine::{
    BlockEngine, GutterLine, KeyValueStore, LogEntry, MemoStore, Notebook, NotebookId,
    parsing::split_lines,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Notebooks,
    Notebook,
    Logs,
}

/// What the event loop has to do after a key was handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Hand the open notebook to an external editor.
    EditExternally,
}

pub struct App<S: KeyValueStore> {
    store: MemoStore<S>,
    engine: BlockEngine,
    pub screen: Screen,
    pub notebooks: Vec<Notebook>,
    pub notebook_state: ListState,
    pub logs: Vec<LogEntry>,
    pub log_state: ListState,
    /// Open notebook and its working copy.
    open: Option<(NotebookId, String)>,
    pub cursor: usize,
    pub status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: MemoStore<S>, engine: BlockEngine) -> Result<Self> {
        let mut app = Self {
            store,
            engine,
            screen: Screen::Notebooks,
            notebooks: Vec::new(),
            notebook_state: ListState::default(),
            logs: Vec::new(),
            log_state: ListState::default(),
            open: None,
            cursor: 0,
            status: None,
        };
        app.reload()?;
        Ok(app)
    }

    fn reload(&mut self) -> Result<()> {
        self.notebooks = self.store.notebooks()?;
        self.logs = self.store.logs()?;
        clamp_selection(&mut self.notebook_state, self.notebooks.len());
        clamp_selection(&mut self.log_state, self.logs.len());
        Ok(())
    }

    pub fn content(&self) -> Option<&str> {
        self.open.as_ref().map(|(_, content)| content.as_str())
    }

    pub fn gutter(&self) -> Vec<GutterLine> {
        self.content()
            .map(|content| self.engine.gutter(content))
            .unwrap_or_default()
    }

    pub fn line_count(&self) -> usize {
        self.content().map(|c| split_lines(c).len()).unwrap_or(0)
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<Action> {
        self.status = None;
        match self.screen {
            Screen::Notebooks => self.notebooks_key(code),
            Screen::Notebook => self.notebook_key(code),
            Screen::Logs => self.logs_key(code),
        }
    }

    fn notebooks_key(&mut self, code: KeyCode) -> Result<Action> {
        match code {
            KeyCode::Char('q') => return Ok(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => {
                step_selection(&mut self.notebook_state, self.notebooks.len(), 1)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                step_selection(&mut self.notebook_state, self.notebooks.len(), -1)
            }
            KeyCode::Char('n') => {
                let notebook = self.store.create_notebook()?;
                self.reload()?;
                self.open_notebook(notebook);
            }
            KeyCode::Enter => {
                if let Some(notebook) = self.selected_notebook().cloned() {
                    self.open_notebook(notebook);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_notebook().map(|n| n.id) {
                    self.store.delete_notebook(id)?;
                    self.reload()?;
                }
            }
            KeyCode::Char('J') => self.move_selected(1)?,
            KeyCode::Char('K') => self.move_selected(-1)?,
            KeyCode::Char('l') => {
                self.reload()?;
                self.screen = Screen::Logs;
            }
            _ => {}
        }
        Ok(Action::None)
    }

    fn notebook_key(&mut self, code: KeyCode) -> Result<Action> {
        let lines = self.line_count();
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_notebook()?,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < lines {
                    self.cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_at_cursor()?,
            KeyCode::Char('c') => self.complete_open()?,
            KeyCode::Char('e') => return Ok(Action::EditExternally),
            _ => {}
        }
        Ok(Action::None)
    }

    fn logs_key(&mut self, code: KeyCode) -> Result<Action> {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Notebooks,
            KeyCode::Down | KeyCode::Char('j') => {
                step_selection(&mut self.log_state, self.logs.len(), 1)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                step_selection(&mut self.log_state, self.logs.len(), -1)
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.selected_log().map(|l| l.id) {
                    match self.store.restore_log(id) {
                        Ok(_) => self.status = Some("Restored".to_string()),
                        Err(e) => self.status = Some(format!("Cannot restore: {e}")),
                    }
                    self.reload()?;
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_log().map(|l| l.id) {
                    self.store.delete_log(id)?;
                    self.reload()?;
                }
            }
            _ => {}
        }
        Ok(Action::None)
    }

    fn selected_notebook(&self) -> Option<&Notebook> {
        self.notebook_state
            .selected()
            .and_then(|i| self.notebooks.get(i))
    }

    pub fn selected_log(&self) -> Option<&LogEntry> {
        self.log_state.selected().and_then(|i| self.logs.get(i))
    }

    fn move_selected(&mut self, delta: isize) -> Result<()> {
        let Some(id) = self.selected_notebook().map(|n| n.id) else {
            return Ok(());
        };
        if self.store.move_notebook(id, delta)? {
            self.reload()?;
            let index = self.notebooks.iter().position(|n| n.id == id);
            self.notebook_state.select(index);
        }
        Ok(())
    }

    fn open_notebook(&mut self, notebook: Notebook) {
        log::debug!("opening notebook {}", notebook.id);
        self.open = Some((notebook.id, notebook.content));
        self.cursor = 0;
        self.screen = Screen::Notebook;
    }

    fn save_open(&mut self) -> Result<()> {
        if let Some((id, content)) = &self.open {
            self.store.update_notebook(*id, content)?;
        }
        Ok(())
    }

    fn close_notebook(&mut self) -> Result<()> {
        self.save_open()?;
        self.open = None;
        self.screen = Screen::Notebooks;
        self.reload()
    }

    fn toggle_at_cursor(&mut self) -> Result<()> {
        let Some((_, content)) = &mut self.open else {
            return Ok(());
        };
        *content = self.engine.toggle(content, self.cursor);
        self.save_open()
    }

    fn complete_open(&mut self) -> Result<()> {
        let Some(id) = self.open.as_ref().map(|(id, _)| *id) else {
            return Ok(());
        };
        self.save_open()?;
        let count = self.store.complete_notebook(id, &self.engine)?;
        self.status = Some(match count {
            0 => "Nothing to complete".to_string(),
            1 => "Completed 1 block".to_string(),
            n => format!("Completed {n} blocks"),
        });
        self.open = None;
        self.screen = Screen::Notebooks;
        self.reload()
    }

    /// Replaces the open notebook's content after an external edit.
    pub fn replace_content(&mut self, content: String) -> Result<()> {
        let Some((_, current)) = &mut self.open else {
            return Ok(());
        };
        *current = content;
        let lines = self.line_count();
        self.cursor = self.cursor.min(lines.saturating_sub(1));
        self.save_open()
    }
}

fn clamp_selection(state: &mut ListState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), len) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

fn step_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(len as isize) as usize;
    state.select(Some(next));
}
