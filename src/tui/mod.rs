// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm) over a [`Session`]: canvas
//! pane, stacks sidebar, toolbox/search/note overlays and a status toast.

use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as UiBlock, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::model::fixtures::three_stacks;
use crate::model::{builtin_catalog, BlockId};
use crate::query::{ranked_templates, Direction};
use crate::render::render_workspace;
use crate::session::{Mode, Session, ToolboxCursor};

mod hints;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);
const SELECTED_COLOR: Color = Color::LightGreen;
const HEADER_COLOR: Color = Color::Cyan;
const TOAST_COLOR: Color = Color::Yellow;

/// Runs the interactive terminal UI over a built-in demo workspace.
pub fn run() -> Result<(), Box<dyn Error>> {
    run_with_session(demo_session())
}

/// Runs the interactive terminal UI over the given session.
pub fn run_with_session(session: Session) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session);

    while !app.should_quit {
        app.session.poll();
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(poll_timeout(&app))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

/// A small demo workspace: three labeled stacks plus a condition to nest.
pub fn demo_session() -> Session {
    let mut workspace = three_stacks();
    let catalog = builtin_catalog();

    let cond = BlockId::new("demo-if").unwrap_or_else(|_| unreachable!("static id"));
    if let Some(template) = catalog.template("controls_if") {
        let _ = workspace.create_from_template(
            cond.clone(),
            template,
            crate::model::WorkspacePoint::new(650, 60),
        );
    }
    if let Some(template) = catalog.template("logic_boolean") {
        let flag = BlockId::new("demo-flag").unwrap_or_else(|_| unreachable!("static id"));
        let _ = workspace.create_from_template(
            flag.clone(),
            template,
            crate::model::WorkspacePoint::new(650, 300),
        );
        let _ = workspace.attach_input(&cond, "IF0", &flag);
    }
    workspace.take_events();

    Session::new(workspace, catalog)
}

/// How long the event loop may sleep without missing a relabel deadline.
fn poll_timeout(app: &App) -> Duration {
    let now = Instant::now();
    match app.session.relabel_due_at() {
        Some(due) => due.saturating_duration_since(now).min(EVENT_POLL_INTERVAL),
        None => EVENT_POLL_INTERVAL,
    }
}

struct App {
    session: Session,
    should_quit: bool,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            session,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.session.mode().clone() {
            Mode::Workspace => self.handle_workspace_key(key),
            Mode::Toolbox(_) => self.handle_toolbox_key(key),
            Mode::ConnectSource => self.handle_connect_source_key(key),
            Mode::ConnectTarget => self.handle_connect_target_key(key),
            Mode::NoteEdit(_) => self.handle_note_key(key),
            Mode::Search { .. } => self.handle_search_key(key),
        }
    }

    fn handle_workspace_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).unwrap_or(0) as usize;
                self.session.select_index(index);
            }
            KeyCode::Left => self.session.navigate(Direction::Left),
            KeyCode::Right => self.session.navigate(Direction::Right),
            KeyCode::Up => self.session.navigate(Direction::Up),
            KeyCode::Down => self.session.navigate(Direction::Down),
            KeyCode::Delete | KeyCode::Backspace => self.session.delete_selection(),
            KeyCode::Char('t') => self.session.open_toolbox(),
            KeyCode::Char('c') => self.session.begin_connection(),
            KeyCode::Char('n') => self.session.open_note_editor(),
            KeyCode::Char('/') => self.session.open_search(),
            KeyCode::Char('y') => self.yank_labels(),
            KeyCode::Esc => self.session.clear_selection(),
            _ => {}
        }
    }

    fn handle_toolbox_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.session.toolbox_move(-1),
            KeyCode::Down => self.session.toolbox_move(1),
            KeyCode::Right => self.session.toolbox_descend(),
            KeyCode::Left | KeyCode::Esc => self.session.toolbox_ascend(),
            KeyCode::Enter => self.session.toolbox_confirm(),
            KeyCode::Backspace => self.session.toolbox_backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.toolbox_input_char(c);
            }
            _ => {}
        }
    }

    fn handle_connect_source_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.session.cycle_connection(),
            KeyCode::Enter => self.session.confirm_connection(),
            KeyCode::Esc => self.session.cancel_connection(),
            _ => {}
        }
    }

    fn handle_connect_target_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).unwrap_or(0) as usize;
                self.session.select_index(index);
            }
            KeyCode::Left => self.session.navigate(Direction::Left),
            KeyCode::Right => self.session.navigate(Direction::Right),
            KeyCode::Up => self.session.navigate(Direction::Up),
            KeyCode::Down => self.session.navigate(Direction::Down),
            KeyCode::Esc => self.session.cancel_connection(),
            _ => {}
        }
    }

    fn handle_note_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.session.save_note(),
            KeyCode::Esc => self.session.cancel_note(),
            KeyCode::Backspace => self.session.note_backspace(),
            KeyCode::Up => self.session.note_suggestion_move(-1),
            KeyCode::Down => self.session.note_suggestion_move(1),
            KeyCode::Tab => self.session.note_accept_suggestion(),
            KeyCode::Char(c) => self.session.note_input_char(c),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.session.submit_search(),
            KeyCode::Esc => self.session.cancel_search(),
            KeyCode::Backspace => self.session.search_backspace(),
            KeyCode::Char(c) => self.session.search_input_char(c),
            _ => {}
        }
    }

    fn yank_labels(&mut self) {
        let snapshot = self.session.label_snapshot();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => match copy_to_clipboard(&json) {
                Ok(_) => self.set_session_status("Labels copied to clipboard (osc52)."),
                Err(err) => self.set_session_status(format!("Clipboard copy failed: {err}")),
            },
            Err(err) => self.set_session_status(format!("Label export failed: {err}")),
        }
    }

    fn set_session_status(&mut self, message: impl Into<String>) {
        // Session owns the toast channel; route shell-level outcomes
        // through the same surface.
        self.session.note_shell_status(message.into());
    }
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let columns = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(rows[0]);

    draw_canvas(frame, app, columns[0]);
    draw_sidebar(frame, app, columns[1]);
    draw_input_line(frame, app, rows[1]);
    draw_footer(frame, app, rows[2]);
}

fn draw_canvas(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let lines = render_workspace(
        app.session.workspace(),
        app.session.store(),
        app.session.selected(),
    );
    let text: Vec<Line<'_>> = lines.into_iter().map(Line::from).collect();
    let canvas = Paragraph::new(text)
        .block(
            UiBlock::default()
                .borders(Borders::ALL)
                .title(" Workspace "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(canvas, area);
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    match app.session.toolbox_cursor() {
        Some(cursor) => draw_toolbox(frame, app, area, cursor),
        None => draw_stacks(frame, app, area),
    }
}

fn draw_stacks(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let session = &app.session;
    let mut entries: Vec<(&crate::label::StackName, &BlockId)> = session
        .store()
        .stack_names()
        .iter()
        .map(|(block_id, name)| (name, block_id))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut items: Vec<ListItem<'_>> = Vec::new();
    for (name, root) in entries {
        let count = session.store().stack_count(root).unwrap_or(0);
        let plural = if count == 1 { "block" } else { "blocks" };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{name} · {count} {plural}"),
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        ))));
        for member in session.workspace().chain_from(root) {
            let Some(block) = session.workspace().block(&member) else {
                continue;
            };
            let label = session
                .display_label(&member)
                .unwrap_or_else(|| member.to_string());
            let style = if session.selected() == Some(&member) {
                Style::default().fg(SELECTED_COLOR)
            } else {
                Style::default()
            };
            items.push(ListItem::new(Line::from(Span::styled(
                format!("  {label} {}", block.kind()),
                style,
            ))));
        }
    }

    let list = List::new(items).block(
        UiBlock::default()
            .borders(Borders::ALL)
            .title(" Stacks "),
    );
    frame.render_widget(list, area);
}

fn draw_toolbox(frame: &mut Frame<'_>, app: &App, area: Rect, cursor: &ToolboxCursor) {
    let session = &app.session;
    let mut items: Vec<ListItem<'_>> = Vec::new();
    let highlight = Style::default()
        .fg(SELECTED_COLOR)
        .add_modifier(Modifier::BOLD);

    match cursor {
        ToolboxCursor::Categories { index } => {
            for (i, category) in session.catalog().categories().iter().enumerate() {
                let style = if i == *index { highlight } else { Style::default() };
                items.push(ListItem::new(Span::styled(category.name().to_owned(), style)));
            }
        }
        ToolboxCursor::Blocks { category, index } => {
            if let Some(category) = session.catalog().category(*category) {
                for (i, template) in category.templates().iter().enumerate() {
                    let style = if i == *index { highlight } else { Style::default() };
                    items.push(ListItem::new(Span::styled(template.label().to_owned(), style)));
                }
            }
        }
        ToolboxCursor::SearchResults { query, index } => {
            for (i, template) in ranked_templates(session.catalog(), query).iter().enumerate() {
                let style = if i == *index { highlight } else { Style::default() };
                items.push(ListItem::new(Span::styled(template.label().to_owned(), style)));
            }
        }
    }

    let title = match cursor {
        ToolboxCursor::SearchResults { query, .. } => format!(" Toolbox /{query} "),
        _ => " Toolbox ".to_owned(),
    };
    let list = List::new(items).block(UiBlock::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_input_line(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let session = &app.session;
    let line = if let Some(draft) = session.note_draft() {
        let suggestions = session.tag_suggestions();
        let mut text = format!("Note: {}", draft.buffer);
        if !suggestions.is_empty() {
            let chosen = suggestions
                .get(draft.suggestion_index)
                .cloned()
                .unwrap_or_default();
            text.push_str(&format!("  [tab: #{chosen}]"));
        }
        Some(text)
    } else {
        session.search_buffer().map(|buffer| format!("Search: {buffer}"))
    };

    if let Some(line) = line {
        frame.render_widget(Paragraph::new(line), area);
    } else if let Some(status) = session.status_line(Instant::now()) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                status.to_owned(),
                Style::default().fg(TOAST_COLOR),
            )),
            area,
        );
    }
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let help = hints::footer_help_line(app.session.mode());
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::Gray))),
        area,
    );
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
