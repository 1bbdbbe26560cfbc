mod app;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env, fs,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process::{self, Command},
};
use thought_memo_config::{Config, MarkerStyle};
use thought_memo_engine::{BlockEngine, FileStore, MarkerEncoding, MemoStore};

use app::{Action, App};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const LOG_FILE: &str = "thought-memo.log";
const EDIT_FILE: &str = ".editing.txt";

fn main() -> Result<()> {
    // Determine data path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let data_path;
    let marker_style;
    let from_config;

    if args.len() == 2 {
        data_path = PathBuf::from(&args[1]);
        marker_style = Config::load()
            .ok()
            .flatten()
            .map(|c| c.marker_style)
            .unwrap_or_default();
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => {
                data_path = config.data_path;
                marker_style = config.marker_style;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No data path provided and no config file found");
                eprintln!("Usage: {} <data-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <data-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [data-folder-path]", args[0]);
        process::exit(1);
    };

    let backend = match FileStore::open(&data_path) {
        Ok(backend) => backend,
        Err(e) => {
            let source = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!(
                "Error: Data path '{}'{} is invalid: {e}",
                data_path.display(),
                source
            );
            process::exit(1);
        }
    };

    init_logging(&data_path);
    log::info!("starting with data path {}", data_path.display());

    let engine = BlockEngine::new(encoding_for(marker_style));
    let mut app = App::new(MemoStore::new(backend), engine)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app, &data_path);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}

/// Logs go to a file in the data directory; the terminal belongs to the UI.
fn init_logging(data_path: &Path) {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_path.join(LOG_FILE));

    match file {
        Ok(file) => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Warn)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Warning: logging disabled, cannot open log file: {e}"),
    }
}

fn encoding_for(style: MarkerStyle) -> MarkerEncoding {
    match style {
        MarkerStyle::Long => MarkerEncoding::Long,
        MarkerStyle::Short => MarkerEncoding::Short,
    }
}

fn run_app(terminal: &mut Tui, app: &mut App<FileStore>, data_path: &Path) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key.code)? {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::EditExternally => {
                let Some(content) = app.content().map(str::to_string) else {
                    continue;
                };
                match edit_externally(terminal, data_path, &content)? {
                    Some(edited) => app.replace_content(edited)?,
                    None => app.status = Some("Editor exited with an error".to_string()),
                }
            }
        }
    }
}

/// Suspends the UI and runs `$VISUAL`/`$EDITOR` (default `vi`) on a scratch
/// copy of `content`. Returns the edited text, or `None` if the editor failed.
fn edit_externally(terminal: &mut Tui, data_path: &Path, content: &str) -> Result<Option<String>> {
    let path = data_path.join(EDIT_FILE);
    fs::write(&path, content)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let editor = env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(&path).status();

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    let edited = match status {
        Ok(status) if status.success() => {
            let mut edited = fs::read_to_string(&path)?;
            // Editors append a final newline the notebook never had.
            if !content.ends_with('\n') && edited.ends_with('\n') {
                edited.pop();
            }
            Some(edited)
        }
        Ok(status) => {
            log::warn!("{editor} exited with {status}");
            None
        }
        Err(e) => {
            log::warn!("failed to run {editor}: {e}");
            None
        }
    };
    fs::remove_file(&path)?;
    Ok(edited)
}
