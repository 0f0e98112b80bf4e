// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): a sidebar with the folder
//! tree or search results on the left, the tab strip and editor on the
//! right, and a one-line status footer. All session semantics live in
//! [`crate::ops::Orchestrator`]; this layer translates key events into
//! actions and draws the result.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::model::{FolderId, NoteId};
use crate::ops::{Action, Orchestrator, SidebarView};
use crate::query::{tree_items, TreeItem};
use crate::store::{Backend, ScratchDir};

mod editor;

pub use editor::EditorState;

const FOCUS_COLOR: Color = Color::LightGreen;
const FOLDER_COLOR: Color = Color::Cyan;
const ACTIVE_TAB_COLOR: Color = Color::LightGreen;
const DIM_COLOR: Color = Color::DarkGray;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the interactive terminal UI against a scratch directory.
pub fn run(root: PathBuf) -> Result<(), Box<dyn Error>> {
    let now = Instant::now();
    let mut orchestrator = Orchestrator::new(ScratchDir::new(root), now);
    orchestrator.load(now);

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(orchestrator);

    while !app.should_quit {
        let now = Instant::now();
        app.orchestrator.tick(now);
        app.sync_editor_from_active_tab();
        terminal.draw(|frame| draw(frame, &app, now))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Dialog {
    None,
    ConfirmDeleteNote(NoteId),
    ConfirmDeleteFolder(FolderId),
    NewFolder { name: String },
}

/// One selectable sidebar row, resolved from the current sidebar view.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SidebarRow {
    Folder(FolderId),
    Note(NoteId),
}

struct App<B: Backend> {
    orchestrator: Orchestrator<B>,
    focus: Focus,
    sidebar_cursor: usize,
    search_input: Option<String>,
    editor: EditorState,
    editor_tab: Option<NoteId>,
    dialog: Dialog,
    should_quit: bool,
}

impl<B: Backend> App<B> {
    fn new(orchestrator: Orchestrator<B>) -> Self {
        let mut app = Self {
            orchestrator,
            focus: Focus::Editor,
            sidebar_cursor: 0,
            search_input: None,
            editor: EditorState::new(),
            editor_tab: None,
            dialog: Dialog::None,
            should_quit: false,
        };
        app.sync_editor_from_active_tab();
        app
    }

    /// Reloads the edit buffer whenever the active tab changed underneath it
    /// (switch, close, delete). While the active tab is stable the buffer is
    /// the source of truth and is left alone.
    fn sync_editor_from_active_tab(&mut self) {
        let active = self.orchestrator.session().active_tab_id().cloned();
        if active == self.editor_tab {
            return;
        }
        self.editor = match active
            .as_ref()
            .and_then(|note_id| self.orchestrator.session().tab(note_id))
        {
            Some(tab) => EditorState::from_content(tab.content()),
            None => EditorState::new(),
        };
        self.editor_tab = active;
    }

    fn sidebar_rows(&self) -> Vec<SidebarRow> {
        match self.orchestrator.sidebar() {
            SidebarView::Tree => tree_items(self.orchestrator.session())
                .into_iter()
                .map(|item| match item {
                    TreeItem::Folder { folder, .. } => SidebarRow::Folder(folder.id().clone()),
                    TreeItem::Note { note, .. } => SidebarRow::Note(note.id().clone()),
                })
                .collect(),
            SidebarView::Results(notes) => notes
                .iter()
                .map(|note| SidebarRow::Note(note.id().clone()))
                .collect(),
            SidebarView::NoResults => Vec::new(),
        }
    }

    fn clamped_cursor(&self, rows: &[SidebarRow]) -> Option<usize> {
        if rows.is_empty() {
            return None;
        }
        Some(self.sidebar_cursor.min(rows.len() - 1))
    }

    fn selected_row(&self) -> Option<SidebarRow> {
        let rows = self.sidebar_rows();
        let cursor = self.clamped_cursor(&rows)?;
        rows.into_iter().nth(cursor)
    }

    fn dispatch(&mut self, action: Action, now: Instant) {
        self.orchestrator.dispatch(action, now);
        self.sync_editor_from_active_tab();
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.dialog != Dialog::None {
            self.handle_dialog_key(key, now);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.dispatch(Action::Save, now),
                KeyCode::Char('n') => {
                    self.dispatch(Action::NewNote, now);
                    self.focus = Focus::Editor;
                }
                KeyCode::Char('w') => self.close_active_tab(now),
                _ => {}
            }
            return;
        }

        if self.search_input.is_some() {
            self.handle_search_key(key.code, now);
            return;
        }

        match key.code {
            KeyCode::Tab => self.toggle_focus(now),
            _ => match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(key.code, now),
                Focus::Editor => self.handle_editor_key(key.code, now),
            },
        }
    }

    fn toggle_focus(&mut self, now: Instant) {
        match self.focus {
            Focus::Sidebar => self.focus = Focus::Editor,
            Focus::Editor => {
                // Leaving the editor is a blur: the tab may re-title itself.
                self.dispatch(Action::EditorBlurred, now);
                self.focus = Focus::Sidebar;
            }
        }
    }

    /// The last tab never closes from the keyboard; the session always shows
    /// something editable.
    fn close_active_tab(&mut self, now: Instant) {
        if self.orchestrator.session().open_tabs().len() < 2 {
            return;
        }
        if let Some(active) = self.orchestrator.session().active_tab_id().cloned() {
            self.dispatch(Action::CloseTab(active), now);
        }
    }

    fn switch_tab_by(&mut self, delta: isize, now: Instant) {
        let tabs = self.orchestrator.session().open_tabs();
        if tabs.len() < 2 {
            return;
        }
        let Some(active) = self.orchestrator.session().active_tab_id() else {
            return;
        };
        let Some(index) = tabs.iter().position(|tab| tab.id() == active) else {
            return;
        };
        let len = tabs.len() as isize;
        let target = (index as isize + delta).rem_euclid(len) as usize;
        let target_id = tabs[target].id().clone();
        self.dispatch(Action::SwitchTab(target_id), now);
    }

    fn handle_sidebar_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.sidebar_cursor += 1,
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
            }
            KeyCode::Enter => self.activate_selected_row(now),
            KeyCode::Char('n') => {
                self.dispatch(Action::NewNote, now);
                self.focus = Focus::Editor;
            }
            KeyCode::Char('f') => {
                self.dialog = Dialog::NewFolder {
                    name: String::new(),
                };
            }
            KeyCode::Char('d') => self.confirm_delete_selected(),
            KeyCode::Char('/') => self.search_input = Some(String::new()),
            KeyCode::Char('[') => self.switch_tab_by(-1, now),
            KeyCode::Char(']') => self.switch_tab_by(1, now),
            _ => {}
        }
        let rows = self.sidebar_rows();
        if let Some(clamped) = self.clamped_cursor(&rows) {
            self.sidebar_cursor = clamped;
        } else {
            self.sidebar_cursor = 0;
        }
    }

    fn activate_selected_row(&mut self, now: Instant) {
        match self.selected_row() {
            Some(SidebarRow::Note(note_id)) => {
                self.dispatch(Action::OpenNote(note_id), now);
                self.focus = Focus::Editor;
            }
            Some(SidebarRow::Folder(folder_id)) => {
                self.dispatch(Action::BrowseFolder(folder_id), now);
            }
            None => {}
        }
    }

    fn confirm_delete_selected(&mut self) {
        match self.selected_row() {
            Some(SidebarRow::Note(note_id)) => {
                self.dialog = Dialog::ConfirmDeleteNote(note_id);
            }
            Some(SidebarRow::Folder(folder_id)) => {
                let is_default = self
                    .orchestrator
                    .session()
                    .folder(&folder_id)
                    .is_some_and(|folder| folder.is_default());
                if !is_default {
                    self.dialog = Dialog::ConfirmDeleteFolder(folder_id);
                }
            }
            None => {}
        }
    }

    fn handle_editor_key(&mut self, code: KeyCode, now: Instant) {
        let edited = match code {
            KeyCode::Esc => {
                self.dispatch(Action::EditorBlurred, now);
                self.focus = Focus::Sidebar;
                return;
            }
            KeyCode::Char(ch) => {
                self.editor.insert_char(ch);
                true
            }
            KeyCode::Enter => {
                self.editor.insert_newline();
                true
            }
            KeyCode::Backspace => {
                self.editor.backspace();
                true
            }
            KeyCode::Left => {
                self.editor.move_left();
                false
            }
            KeyCode::Right => {
                self.editor.move_right();
                false
            }
            KeyCode::Up => {
                self.editor.move_up();
                false
            }
            KeyCode::Down => {
                self.editor.move_down();
                false
            }
            KeyCode::Home => {
                self.editor.move_line_start();
                false
            }
            KeyCode::End => {
                self.editor.move_line_end();
                false
            }
            _ => false,
        };
        if edited {
            self.dispatch(Action::EditContent(self.editor.content()), now);
        }
    }

    fn handle_search_key(&mut self, code: KeyCode, now: Instant) {
        let Some(query) = self.search_input.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.search_input = None;
                self.dispatch(Action::SearchInput(String::new()), now);
            }
            KeyCode::Enter => {
                // Results stay up; only the input box closes.
                self.search_input = None;
            }
            KeyCode::Backspace => {
                query.pop();
                let query = query.clone();
                self.dispatch(Action::SearchInput(query), now);
            }
            KeyCode::Char(ch) => {
                query.push(ch);
                let query = query.clone();
                self.dispatch(Action::SearchInput(query), now);
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent, now: Instant) {
        match std::mem::replace(&mut self.dialog, Dialog::None) {
            Dialog::None => {}
            Dialog::ConfirmDeleteNote(note_id) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.dispatch(Action::DeleteNote(note_id), now);
                }
                KeyCode::Char('n') | KeyCode::Esc => {}
                _ => self.dialog = Dialog::ConfirmDeleteNote(note_id),
            },
            Dialog::ConfirmDeleteFolder(folder_id) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.dispatch(Action::DeleteFolder(folder_id), now);
                }
                KeyCode::Char('n') | KeyCode::Esc => {}
                _ => self.dialog = Dialog::ConfirmDeleteFolder(folder_id),
            },
            Dialog::NewFolder { mut name } => match key.code {
                KeyCode::Enter => {
                    self.dispatch(Action::NewFolder { name }, now);
                }
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    name.pop();
                    self.dialog = Dialog::NewFolder { name };
                }
                KeyCode::Char(ch) => {
                    name.push(ch);
                    self.dialog = Dialog::NewFolder { name };
                }
                _ => self.dialog = Dialog::NewFolder { name },
            },
        }
    }
}

fn draw<B: Backend>(frame: &mut Frame<'_>, app: &App<B>, now: Instant) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());
    let main_area = layout[0];
    let status_area = layout[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_area);
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(panes[0]);
    let search_area = sidebar[0];
    let list_area = sidebar[1];
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(panes[1]);
    let tabs_area = right[0];
    let editor_area = right[1];

    draw_search_box(frame, app, search_area);
    draw_sidebar_list(frame, app, list_area);
    draw_tab_strip(frame, app, tabs_area);
    draw_editor(frame, app, editor_area);
    draw_status_line(frame, app, status_area, now);
    draw_dialog(frame, app, main_area);
}

fn draw_search_box<B: Backend>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let query = app.search_input.as_deref().unwrap_or("");
    let editing = app.search_input.is_some();
    let border_style = if editing {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(DIM_COLOR)
    };
    let search = Paragraph::new(query).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search (/)")
            .border_style(border_style),
    );
    frame.render_widget(search, area);
    if editing {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(query.chars().count() as u16)
            .min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_sidebar_list<B: Backend>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(DIM_COLOR)
    };
    let (title, lines) = match app.orchestrator.sidebar() {
        SidebarView::Tree => ("Notes", sidebar_tree_lines(app)),
        SidebarView::Results(notes) => (
            "Results",
            notes
                .iter()
                .map(|note| Line::raw(note.title().to_owned()))
                .collect(),
        ),
        SidebarView::NoResults => (
            "Results",
            vec![Line::styled("No results", Style::default().fg(DIM_COLOR))],
        ),
    };

    let items = lines.into_iter().map(ListItem::new).collect::<Vec<_>>();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let rows = app.sidebar_rows();
    let mut state = ListState::default();
    if app.focus == Focus::Sidebar {
        state.select(app.clamped_cursor(&rows));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn sidebar_tree_lines<B: Backend>(app: &App<B>) -> Vec<Line<'static>> {
    let session = app.orchestrator.session();
    tree_items(session)
        .into_iter()
        .map(|item| match item {
            TreeItem::Folder { folder, current } => {
                let marker = if current { "▾" } else { "▸" };
                Line::styled(
                    format!("{marker} {}", folder.name()),
                    Style::default().fg(FOLDER_COLOR),
                )
            }
            TreeItem::Note { note, nested } => {
                let indent = if nested { "    " } else { "  " };
                let open_marker = if session.has_tab(note.id()) { "•" } else { " " };
                Line::raw(format!("{indent}{open_marker}{}", note.title()))
            }
        })
        .collect()
}

fn draw_tab_strip<B: Backend>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let session = app.orchestrator.session();
    let active = session.active_tab_id();
    let mut spans = Vec::new();
    for tab in session.open_tabs() {
        let style = if Some(tab.id()) == active {
            Style::default().fg(ACTIVE_TAB_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM_COLOR)
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::raw("│"));
    }
    spans.pop();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_editor<B: Backend>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let border_style = if app.focus == Focus::Editor {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(DIM_COLOR)
    };
    let title = app
        .orchestrator
        .session()
        .active_tab()
        .map_or_else(|| "No note".to_owned(), |tab| tab.title().to_owned());

    let inner_height = area.height.saturating_sub(2) as usize;
    let (row, col) = app.editor.cursor();
    let scroll = row.saturating_sub(inner_height.saturating_sub(1)) as u16;

    let text = app
        .editor
        .lines()
        .iter()
        .map(|line| Line::raw(line.clone()))
        .collect::<Vec<_>>();
    let editor = Paragraph::new(text)
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );
    frame.render_widget(editor, area);

    if app.focus == Focus::Editor && app.dialog == Dialog::None && app.search_input.is_none() {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(col as u16)
            .min(area.x + area.width.saturating_sub(2));
        let cursor_y = area
            .y
            .saturating_add(1)
            .saturating_add((row as u16).saturating_sub(scroll));
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_status_line<B: Backend>(frame: &mut Frame<'_>, app: &App<B>, area: Rect, now: Instant) {
    let hints = match app.focus {
        Focus::Sidebar => "q quit │ ⏎ open │ n note │ f folder │ d delete │ / search │ [ ] tabs",
        Focus::Editor => "esc sidebar │ ^s save │ ^n new │ ^w close tab",
    };
    let mut spans = vec![Span::styled(hints, Style::default().fg(DIM_COLOR))];
    if let Some(notice) = app.orchestrator.notice(now) {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            notice.to_owned(),
            Style::default().fg(Color::LightRed),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let label = app.orchestrator.status().label();
    if !label.is_empty() {
        let status = Paragraph::new(Span::styled(label, Style::default().fg(FOCUS_COLOR)))
            .alignment(Alignment::Right);
        frame.render_widget(status, area);
    }
}

fn draw_dialog<B: Backend>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let (title, body) = match &app.dialog {
        Dialog::None => return,
        Dialog::ConfirmDeleteNote(note_id) => {
            let name = app
                .orchestrator
                .session()
                .note(note_id)
                .map_or_else(|| note_id.to_string(), |note| note.title().to_owned());
            ("Delete note?".to_owned(), format!("{name}\n\n[y] delete  [n] keep"))
        }
        Dialog::ConfirmDeleteFolder(folder_id) => {
            let name = app
                .orchestrator
                .session()
                .folder(folder_id)
                .map_or_else(|| folder_id.to_string(), |folder| folder.name().to_owned());
            (
                "Delete folder?".to_owned(),
                format!("{name}\n(notes are kept)\n\n[y] delete  [n] keep"),
            )
        }
        Dialog::NewFolder { name } => (
            "New folder".to_owned(),
            format!("{name}_\n\n[⏎] create  [esc] cancel"),
        ),
    };

    let popup = centered_rect(area, 40, 6);
    frame.render_widget(Clear, popup);
    let dialog = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(FOCUS_COLOR)),
    );
    frame.render_widget(dialog, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
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
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
