use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use thought_memo_engine::{BlockState, KeyValueStore, parsing::remove_marker, parsing::split_lines};

use crate::app::{App, Screen};

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let help = match app.screen {
        Screen::Notebooks => "q: Quit | n: New | Enter: Open | d: Delete | J/K: Move | l: Log",
        Screen::Notebook => "Esc: Back | j/k: Line | Space: Toggle | c: Complete | e: Edit",
        Screen::Logs => "Esc: Back | j/k: Select | r: Restore | x: Delete",
    };

    match app.screen {
        Screen::Notebooks => draw_notebooks(f, app, chunks[0]),
        Screen::Notebook => draw_notebook(f, app, chunks[0]),
        Screen::Logs => draw_logs(f, app, chunks[0]),
    }

    let footer = match &app.status {
        Some(status) => Line::from(vec![
            Span::styled(status.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(" | "),
            Span::raw(help),
        ]),
        None => Line::from(help),
    };
    f.render_widget(Paragraph::new(footer), chunks[1]);
}

fn draw_notebooks<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .notebooks
        .iter()
        .map(|notebook| {
            let title = notebook.title();
            let title = if title.is_empty() {
                Span::styled("(empty)", Style::default().add_modifier(Modifier::DIM))
            } else {
                Span::raw(title)
            };
            let updated = notebook.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
            ListItem::new(Line::from(vec![
                Span::styled(format!("{updated}  "), Style::default().fg(Color::DarkGray)),
                title,
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Notebooks"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.notebook_state);
}

fn draw_notebook<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let Some(content) = app.content() else {
        return;
    };
    let gutter = app.gutter();

    let lines: Vec<Line> = split_lines(content)
        .into_iter()
        .zip(&gutter)
        .map(|(text, g)| {
            let symbol_style = match g.state {
                BlockState::Complete => Style::default().fg(Color::Green),
                _ => Style::default().fg(Color::Cyan),
            };
            let mut text_style = if g.excluded {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            if g.index == app.cursor {
                text_style = text_style.add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(format!("{:<2}", g.symbol), symbol_style),
                Span::styled(remove_marker(text).into_owned(), text_style),
            ])
        })
        .collect();

    // Keep the cursor line on screen.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = app.cursor.saturating_sub(visible.saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Notebook"))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    f.render_widget(paragraph, area);
}

fn draw_logs<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items: Vec<ListItem> = app
        .logs
        .iter()
        .map(|entry| {
            let at = entry.completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
            ListItem::new(Line::from(vec![
                Span::styled(format!("{at}  "), Style::default().fg(Color::DarkGray)),
                Span::raw(entry.headline().to_string()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Completed"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, chunks[0], &mut app.log_state);

    let detail: Vec<Line> = app
        .selected_log()
        .map(|entry| entry.text.lines().map(|l| Line::from(l.to_string())).collect())
        .unwrap_or_default();

    let detail = Paragraph::new(detail).block(Block::default().borders(Borders::ALL).title("Entry"));
    f.render_widget(detail, chunks[1]);
}
