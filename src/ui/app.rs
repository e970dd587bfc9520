use std::mem;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::models::{IdCounter, Status};
use crate::roster::{Roster, RosterAction};
use crate::transcode::{import_replace, write_export, ImportOutcome};

use super::forms::{ConfirmRemove, ImportForm, NameForm};
use super::helpers::{centered_rect, plural, status_badge, summary_text, surface_error};
use super::screens::RosterScreen;

/// Header space for the title and aggregate counts.
const HEADER_HEIGHT: u16 = 4;
/// Footer space reserved for the status message, the summary and key hints.
const FOOTER_HEIGHT: u16 = 4;
/// Rows skipped by PgUp/PgDn.
const PAGE_STEP: isize = 5;

/// Fine-grained modes layered over the roster table.
enum Mode {
    Normal,
    AddingStudent(NameForm),
    ConfirmRemove(ConfirmRemove),
    Importing(ImportForm),
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    roster: Roster,
    counter: IdCounter,
    config: AppConfig,
    screen: RosterScreen,
    mode: Mode,
    status: Option<StatusMessage>,
    last_export: Option<PathBuf>,
}

impl App {
    pub fn new(roster: Roster, counter: IdCounter, config: AppConfig) -> Self {
        let screen = RosterScreen::new(&roster);
        Self {
            roster,
            counter,
            config,
            screen,
            mode: Mode::Normal,
            status: None,
            last_export: None,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingStudent(form) => self.handle_add_student(code, form)?,
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm)?,
            Mode::Importing(form) => self.handle_import_key(code, form)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Bracketed paste lands in whichever text field is open.
    pub(crate) fn handle_paste(&mut self, pasted: &str) {
        match &mut self.mode {
            Mode::Importing(form) => form.paste(pasted),
            Mode::AddingStudent(form) => {
                let single_line = pasted.lines().next().unwrap_or_default();
                form.name.push_str(single_line);
                form.error = None;
            }
            Mode::Searching(state) => {
                state.query.push_str(pasted.lines().next().unwrap_or_default());
                let filter = Some(state.query.clone());
                self.screen.set_filter(filter, &self.roster);
            }
            _ => {}
        }
    }

    /// Ctrl-S submits the import dialog.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        let previous = mem::replace(&mut self.mode, Mode::Normal);
        match previous {
            Mode::Importing(form) => {
                self.mode = self.submit_import(form);
            }
            other => self.mode = other,
        }
        Ok(())
    }

    /// Ctrl-L empties the import buffer.
    pub(crate) fn handle_ctrl_l(&mut self) -> Result<()> {
        if let Mode::Importing(form) = &mut self.mode {
            form.clear();
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.screen.has_filter() {
                    self.screen.set_filter(None, &self.roster);
                    self.clear_status();
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.move_selection(PAGE_STEP),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState {
                    query: self.screen.filter.clone().unwrap_or_default(),
                }));
            }
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingStudent(NameForm::default()));
            }
            KeyCode::Char('-') => match self.screen.current().map(ConfirmRemove::from) {
                Some(confirm) => {
                    self.clear_status();
                    return Ok(Mode::ConfirmRemove(confirm));
                }
                None => self.set_status("No student selected to remove.", StatusKind::Error),
            },
            KeyCode::Char('p') => self.mark_current(Status::Present),
            KeyCode::Char('a') => self.mark_current(Status::Absent),
            KeyCode::Char('t') | KeyCode::Char(' ') => match self.screen.current().cloned() {
                Some(record) => {
                    self.apply(RosterAction::Toggle(record.id));
                    let status = self
                        .roster
                        .get(record.id)
                        .map(|s| s.status)
                        .unwrap_or_default();
                    self.set_status(format!("{} is {status}.", record.name), StatusKind::Info);
                }
                None => self.set_status("No student selected.", StatusKind::Error),
            },
            KeyCode::Char('P') => {
                self.apply(RosterAction::MarkAll(Status::Present));
                self.set_status("Marked everyone present.", StatusKind::Info);
            }
            KeyCode::Char('A') => {
                self.apply(RosterAction::MarkAll(Status::Absent));
                self.set_status("Marked everyone absent.", StatusKind::Info);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.apply(RosterAction::Reset);
                self.set_status("Attendance reset.", StatusKind::Info);
            }
            KeyCode::Char('x') | KeyCode::Char('X') => self.export(),
            KeyCode::Char('o') | KeyCode::Char('O') => self.open_last_export(),
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.clear_status();
                return Ok(Mode::Importing(ImportForm::default()));
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_student(&mut self, code: KeyCode, mut form: NameForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add student cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_student(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingStudent(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.apply(RosterAction::Remove(confirm.id));
                self.set_status(format!("Removed {}.", confirm.name), StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmRemove(confirm)),
        }
    }

    fn handle_import_key(&mut self, code: KeyCode, mut form: ImportForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Import cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => form.newline(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::Importing(form))
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.screen.set_filter(None, &self.roster);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => return Ok(Mode::Normal),
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.move_selection(PAGE_STEP),
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => return Ok(Mode::Searching(state)),
        }

        let filter = if state.query.is_empty() {
            None
        } else {
            Some(state.query.clone())
        };
        if filter != self.screen.filter {
            self.screen.set_filter(filter, &self.roster);
        }

        Ok(Mode::Searching(state))
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Dispatch to the roster and resync the table.
    fn apply(&mut self, action: RosterAction) {
        self.roster.dispatch(action);
        self.screen.refresh(&self.roster);
    }

    fn mark_current(&mut self, status: Status) {
        match self.screen.current().cloned() {
            Some(record) => {
                self.apply(RosterAction::Mark {
                    id: record.id,
                    status,
                });
                self.set_status(format!("Marked {} {status}.", record.name), StatusKind::Info);
            }
            None => self.set_status("No student selected.", StatusKind::Error),
        }
    }

    fn save_new_student(&mut self, form: &NameForm) -> Result<()> {
        let name = form.parse_input()?;
        let record = self.roster.add_named(&name, &mut self.counter)?;
        self.screen.refresh(&self.roster);
        self.screen.focus(record.id);
        self.set_status(
            format!("Added {} (#{}).", record.name, record.id),
            StatusKind::Info,
        );
        Ok(())
    }

    /// Keep the dialog open when the buffer is blank so the user can paste.
    fn submit_import(&mut self, form: ImportForm) -> Mode {
        match import_replace(&mut self.roster, &form.text, &mut self.counter) {
            Ok(ImportOutcome::Replaced(count)) => {
                self.screen.set_filter(None, &self.roster);
                self.screen.select_first();
                self.set_status(
                    format!("Imported {}.", plural(count, "student")),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            Ok(ImportOutcome::NothingParsed) => Mode::Normal,
            Err(err) => {
                warn!(error = %err, "import rejected");
                self.set_status(err.to_string(), StatusKind::Error);
                Mode::Importing(form)
            }
        }
    }

    fn export(&mut self) {
        match write_export(
            &self.config.export_dir,
            &self.config.export_file_name,
            self.roster.records(),
        ) {
            Ok(path) => {
                self.set_status(
                    format!("Exported to {}. Press 'o' to open.", path.display()),
                    StatusKind::Info,
                );
                self.last_export = Some(path);
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                self.set_status(format!("Export failed: {err}"), StatusKind::Error);
            }
        }
    }

    fn open_last_export(&mut self) {
        let Some(path) = self.last_export.clone() else {
            self.set_status("Nothing exported yet. Press 'x' first.", StatusKind::Error);
            return;
        };
        match open_path(&path) {
            Ok(()) => {
                info!(path = %path.display(), "opened export");
                self.set_status(format!("Opened {}.", path.display()), StatusKind::Info);
            }
            Err(err) => self.set_status(format!("Failed to open export: {err}"), StatusKind::Error),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::AddingStudent(form) => self.draw_name_form(frame, area, form),
            Mode::ConfirmRemove(confirm) => self.draw_confirm_remove(frame, area, confirm),
            Mode::Importing(form) => self.draw_import_form(frame, area, form),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let counts = self.roster.counts();
        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    "Classroom Attendance",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  •  {}", plural(counts.total, "student"))),
            ]),
            Line::from(Span::styled(
                format!("P:{} • A:{}", counts.present, counts.absent),
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Roster"));
        frame.render_widget(header, area);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.screen.filter {
            Some(q) if self.screen.has_filter() => format!("Students • filter: {q}"),
            _ => "Students".to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.screen.visible.is_empty() {
            let message = Paragraph::new("No results")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["#", "Student", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.screen.visible.iter().map(|s| {
            Row::new(vec![
                Cell::from(s.id.to_string()),
                Cell::from(s.name.clone()),
                Cell::from(status_badge(s.status)),
            ])
        });
        let widths = [
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(self.screen.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };
        let summary = Line::from(Span::styled(
            summary_text(&self.roster.counts()),
            Style::default().fg(Color::Gray),
        ));

        let paragraph = Paragraph::new(vec![status_line, summary, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Importing(_) => &[
                ("[Ctrl-S]", " Import (replace)   "),
                ("[Ctrl-L]", " Clear   "),
                ("[Enter]", " New Line   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::Searching(_) => &[
                ("[↑↓]", " Select   "),
                ("[Enter]", " Keep Filter   "),
                ("[Esc]", " Clear"),
            ],
            Mode::AddingStudent(_) => &[("[Enter]", " Save   "), ("[Esc]", " Cancel")],
            Mode::ConfirmRemove(_) => &[("[y]", " Remove   "), ("[n/Esc]", " Keep")],
            Mode::Normal => &[
                ("[↑↓]", " Select   "),
                ("[p/a]", " Present/Absent   "),
                ("[t]", " Toggle   "),
                ("[P/A]", " All Present/Absent   "),
                ("[r]", " Reset   "),
                ("[f]", " Search   "),
                ("[+]", " Add   "),
                ("[-]", " Remove   "),
                ("[x]", " Export   "),
                ("[i]", " Import   "),
                ("[q]", " Quit"),
            ],
        };

        Line::from(
            hints
                .iter()
                .flat_map(|(key, label)| {
                    [Span::styled(*key, key_style), Span::raw(*label)]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn draw_name_form(&self, frame: &mut Frame, area: Rect, form: &NameForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Student").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.build_line("Name"), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to add • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = "Name: ".len() as u16;
        frame.set_cursor_position((inner.x + prefix + form.value_len() as u16, inner.y));
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove {} (#{})?", confirm.name, confirm.id)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_import_form(&self, frame: &mut Frame, area: Rect, form: &ImportForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Import CSV (replaces roster)")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let (cursor_col, cursor_row) = form.cursor();
        let scroll = cursor_row.saturating_sub(inner.height.saturating_sub(1));
        let paragraph = Paragraph::new(form.lines()).scroll((scroll, 0));
        frame.render_widget(paragraph, inner);

        let cursor_x = (inner.x + cursor_col).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y + cursor_row - scroll));
    }
}
