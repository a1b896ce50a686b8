use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};
use ratatui::Frame;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::store::{CatalogState, CatalogStore, Command};

use super::forms::{
    AuthorForm, ConfirmDelete, GenreField, GenreForm, RecordField, RecordForm,
};
use super::helpers::{centered_rect, key_style, status_badge, surface_error};
use super::screens::{author_rows, record_rows, Tab, TableCursor};

/// Header height: tab bar plus its border.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const PAGE_STEP: isize = 5;

/// Fine-grained modes layered on top of the current tab.
enum Mode {
    Normal,
    AddingGenre(GenreForm),
    AddingAuthor(AuthorForm),
    AddingRecord(RecordForm),
    ConfirmGenreDelete(ConfirmDelete),
    ConfirmAuthorDelete(ConfirmDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

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

/// Presentation state for the TUI. The catalog itself lives in the owned
/// [`CatalogStore`]; everything else here is view bookkeeping.
pub struct App {
    store: CatalogStore,
    author_separator: String,
    tab: Tab,
    genres: TableCursor,
    records: TableCursor,
    authors: TableCursor,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: CatalogStore, config: &AppConfig) -> Self {
        Self {
            store,
            author_separator: config.author_separator.clone(),
            tab: Tab::Dashboard,
            genres: TableCursor::default(),
            records: TableCursor::default(),
            authors: TableCursor::default(),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn state(&self) -> &CatalogState {
        self.store.state()
    }

    /// Feed one key press through the current mode. Returns `true` when the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingGenre(form) => self.handle_add_genre(code, form)?,
            Mode::AddingAuthor(form) => self.handle_add_author(code, form)?,
            Mode::AddingRecord(form) => self.handle_add_record(code, form)?,
            Mode::ConfirmGenreDelete(confirm) => self.handle_confirm_genre_delete(code, confirm),
            Mode::ConfirmAuthorDelete(confirm) => {
                self.handle_confirm_author_delete(code, confirm)
            }
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.tab == Tab::Dashboard {
                    *exit = true;
                } else {
                    self.switch_tab(Tab::Dashboard);
                }
            }
            KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::BackTab => self.switch_tab(self.tab.previous()),
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if let Some(tab) = Tab::from_digit(ch) {
                    self.switch_tab(tab);
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => {
                if let Some(cursor) = self.current_cursor_mut() {
                    cursor.select_first();
                }
            }
            KeyCode::End => {
                let len = self.current_len();
                if let Some(cursor) = self.current_cursor_mut() {
                    cursor.select_last(len);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('a') => return Ok(self.open_add_form()),
            KeyCode::Char('-') | KeyCode::Char('d') => return Ok(self.open_delete_confirm()),
            KeyCode::Char(' ') | KeyCode::Enter if self.tab == Tab::Records => {
                self.toggle_selected_record();
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn open_add_form(&mut self) -> Mode {
        self.clear_status();
        match self.tab {
            Tab::Genres => Mode::AddingGenre(GenreForm::default()),
            Tab::Authors => Mode::AddingAuthor(AuthorForm::default()),
            Tab::Records => Mode::AddingRecord(RecordForm::default()),
            Tab::Dashboard => {
                self.set_status("Pick a tab before adding.", StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn open_delete_confirm(&mut self) -> Mode {
        let state = self.store.state();
        match self.tab {
            Tab::Genres => {
                if let Some(genre) = state.genres.get(self.genres.selected) {
                    let confirm = ConfirmDelete {
                        id: genre.id.clone(),
                        name: genre.name.clone(),
                        referenced_by: state
                            .records
                            .iter()
                            .filter(|record| record.genre_id == genre.id)
                            .count(),
                    };
                    self.clear_status();
                    return Mode::ConfirmGenreDelete(confirm);
                }
                self.set_status("No genre selected to delete.", StatusKind::Error);
            }
            Tab::Authors => {
                if let Some(author) = state.authors.get(self.authors.selected) {
                    let confirm = ConfirmDelete {
                        id: author.id.clone(),
                        name: author.name.clone(),
                        referenced_by: state.record_count_for_author(&author.id),
                    };
                    self.clear_status();
                    return Mode::ConfirmAuthorDelete(confirm);
                }
                self.set_status("No author selected to delete.", StatusKind::Error);
            }
            Tab::Records => {
                self.set_status("Records cannot be deleted.", StatusKind::Error);
            }
            Tab::Dashboard => {}
        }
        Mode::Normal
    }

    fn handle_add_genre(&mut self, code: KeyCode, mut form: GenreForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add genre cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_genre(&form) {
                Ok(()) => return Ok(Mode::Normal),
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
        Ok(Mode::AddingGenre(form))
    }

    fn handle_add_author(&mut self, code: KeyCode, mut form: AuthorForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add author cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_author(&form) {
                Ok(()) => return Ok(Mode::Normal),
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
        Ok(Mode::AddingAuthor(form))
    }

    fn handle_add_record(&mut self, code: KeyCode, mut form: RecordForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add record cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Left | KeyCode::Up if form.active == RecordField::Genre => {
                form.cycle_genre(-1, self.store.state())
            }
            KeyCode::Right | KeyCode::Down if form.active == RecordField::Genre => {
                form.cycle_genre(1, self.store.state())
            }
            KeyCode::Up if form.active == RecordField::Authors => {
                form.move_author_cursor(-1, self.store.state())
            }
            KeyCode::Down if form.active == RecordField::Authors => {
                form.move_author_cursor(1, self.store.state())
            }
            KeyCode::Enter => match self.save_new_record(&form) {
                Ok(()) => return Ok(Mode::Normal),
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch, self.store.state()) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingRecord(form))
    }

    fn handle_confirm_genre_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.apply(Command::DeleteGenre {
                    id: confirm.id.clone(),
                });
                let len = self.store.state().genres.len();
                self.genres.ensure_in_bounds(len);
                info!(genre = %confirm.name, "genre deleted");
                self.set_status(format!("Deleted genre \"{}\".", confirm.name), StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmGenreDelete(confirm),
        }
    }

    fn handle_confirm_author_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.apply(Command::DeleteAuthor {
                    id: confirm.id.clone(),
                });
                let len = self.store.state().authors.len();
                self.authors.ensure_in_bounds(len);
                info!(author = %confirm.name, "author deleted");
                self.set_status(
                    format!("Deleted author \"{}\".", confirm.name),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            _ => Mode::ConfirmAuthorDelete(confirm),
        }
    }

    fn save_new_genre(&mut self, form: &GenreForm) -> Result<()> {
        let genre = form.parse_inputs()?;
        let name = genre.name.clone();
        self.apply(Command::AddGenre(genre));
        self.genres.select_last(self.store.state().genres.len());
        info!(genre = %name, "genre added");
        self.set_status(format!("Added genre \"{name}\"."), StatusKind::Info);
        Ok(())
    }

    fn save_new_author(&mut self, form: &AuthorForm) -> Result<()> {
        let author = form.parse_inputs()?;
        let name = author.name.clone();
        self.apply(Command::AddAuthor(author));
        self.authors.select_last(self.store.state().authors.len());
        info!(author = %name, "author added");
        self.set_status(format!("Added author \"{name}\"."), StatusKind::Info);
        Ok(())
    }

    fn save_new_record(&mut self, form: &RecordForm) -> Result<()> {
        let record = form.parse_inputs(self.store.state())?;
        let title = record.title.clone();
        self.apply(Command::AddRecord(record));
        self.records.select_last(self.store.state().records.len());
        info!(record = %title, "record added");
        self.set_status(format!("Added record \"{title}\"."), StatusKind::Info);
        Ok(())
    }

    fn toggle_selected_record(&mut self) {
        let Some(record) = self.store.state().records.get(self.records.selected).cloned() else {
            self.set_status("No record selected.", StatusKind::Error);
            return;
        };
        self.apply(Command::ToggleRecordStatus {
            id: record.id.clone(),
        });
        info!(record = %record.title, active = !record.active, "record status toggled");
        self.set_status(
            format!("Status of \"{}\" changed.", record.title),
            StatusKind::Info,
        );
    }

    /// Single funnel for every mutation so each command is traced once.
    fn apply(&mut self, command: Command) {
        debug!(command = command.kind(), "dispatching");
        self.store.dispatch(command);
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.clear_status();
    }

    fn current_len(&self) -> usize {
        let state = self.store.state();
        match self.tab {
            Tab::Genres => state.genres.len(),
            Tab::Records => state.records.len(),
            Tab::Authors => state.authors.len(),
            Tab::Dashboard => 0,
        }
    }

    fn current_cursor_mut(&mut self) -> Option<&mut TableCursor> {
        match self.tab {
            Tab::Genres => Some(&mut self.genres),
            Tab::Records => Some(&mut self.records),
            Tab::Authors => Some(&mut self.authors),
            Tab::Dashboard => None,
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.current_len();
        if let Some(cursor) = self.current_cursor_mut() {
            cursor.move_selection(offset, len);
        }
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

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        match self.tab {
            Tab::Dashboard => self.draw_dashboard(frame, chunks[1]),
            Tab::Genres => self.draw_genres(frame, chunks[1]),
            Tab::Records => self.draw_records(frame, chunks[1]),
            Tab::Authors => self.draw_authors(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::AddingGenre(form) => self.draw_genre_form(frame, area, form),
            Mode::AddingAuthor(form) => self.draw_author_form(frame, area, form),
            Mode::AddingRecord(form) => self.draw_record_form(frame, area, form),
            Mode::ConfirmGenreDelete(confirm) => {
                self.draw_confirm_delete(frame, area, "genre", confirm)
            }
            Mode::ConfirmAuthorDelete(confirm) => {
                self.draw_confirm_delete(frame, area, "author", confirm)
            }
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Record Shop"))
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                "Record Shop",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Your modern partner in managing classic music.",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(banner, chunks[0]);

        let stats = self.store.state().stats();
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[1]);
        let counters = [
            ("Vinyl Records", stats.records),
            ("Genres", stats.genres),
            ("Authors", stats.authors),
        ];
        for ((title, count), card) in counters.into_iter().zip(cards.iter()) {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                count.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(paragraph, *card);
        }
    }

    fn draw_genres(&self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let block = Block::default().borders(Borders::ALL).title("Genres");
        if state.genres.is_empty() {
            self.draw_empty(frame, area, block, "No genres yet. Press '+' to add one.");
            return;
        }

        let rows = state.genres.iter().map(|genre| {
            Row::new(vec![
                Cell::from(genre.name.clone()),
                Cell::from(genre.description.clone()),
            ])
        });
        let table = Table::new(rows, [Constraint::Percentage(25), Constraint::Percentage(75)])
            .header(self.table_header(&["Name", "Description"]))
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut table_state = TableState::default().with_selected(Some(self.genres.selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn draw_records(&self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let block = Block::default().borders(Borders::ALL).title("Vinyl Records");
        if state.records.is_empty() {
            self.draw_empty(frame, area, block, "No records yet. Press '+' to add one.");
            return;
        }

        let rows = record_rows(state, &self.author_separator)
            .into_iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.title),
                    Cell::from(row.genre),
                    Cell::from(row.authors),
                    Cell::from(status_badge(row.active)),
                ])
            });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Percentage(20),
                Constraint::Percentage(30),
                Constraint::Length(10),
            ],
        )
        .header(self.table_header(&["Title", "Genre", "Authors", "Active"]))
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut table_state = TableState::default().with_selected(Some(self.records.selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn draw_authors(&self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let block = Block::default().borders(Borders::ALL).title("Authors");
        if state.authors.is_empty() {
            self.draw_empty(frame, area, block, "No authors yet. Press '+' to add one.");
            return;
        }

        let rows = author_rows(state).into_iter().map(|row| {
            Row::new(vec![
                Cell::from(row.name),
                Cell::from(row.records.to_string()),
            ])
        });
        let table = Table::new(rows, [Constraint::Percentage(70), Constraint::Percentage(30)])
            .header(self.table_header(&["Name", "Records"]))
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut table_state = TableState::default().with_selected(Some(self.authors.selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn table_header(&self, titles: &[&'static str]) -> Row<'static> {
        Row::new(titles.iter().map(|title| Cell::from(*title)))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1)
    }

    fn draw_empty(&self, frame: &mut Frame, area: Rect, block: Block, message: &'static str) {
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
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

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key = key_style();
        let hint = |keys: &'static str, label: &'static str| {
            [Span::styled(keys, key), Span::raw(format!(" {label}   "))]
        };

        let spans: Vec<Span<'static>> = match (&self.mode, self.tab) {
            (Mode::AddingRecord(_), _) => [
                hint("[Tab]", "Next Field"),
                hint("[←→]", "Genre"),
                hint("[↑↓/Space]", "Authors"),
                hint("[Enter]", "Save"),
                hint("[Esc]", "Cancel"),
            ]
            .concat(),
            (Mode::AddingGenre(_) | Mode::AddingAuthor(_), _) => {
                [hint("[Enter]", "Save"), hint("[Esc]", "Cancel")].concat()
            }
            (Mode::ConfirmGenreDelete(_) | Mode::ConfirmAuthorDelete(_), _) => {
                [hint("[Y]", "Delete"), hint("[N/Esc]", "Cancel")].concat()
            }
            (Mode::Normal, Tab::Dashboard) => {
                [hint("[Tab/1-4]", "Navigate"), hint("[q]", "Quit")].concat()
            }
            (Mode::Normal, Tab::Records) => [
                hint("[↑↓]", "Select"),
                hint("[+]", "Add"),
                hint("[Space]", "Toggle Active"),
                hint("[Tab]", "Next Page"),
                hint("[q]", "Quit"),
            ]
            .concat(),
            (Mode::Normal, Tab::Genres | Tab::Authors) => [
                hint("[↑↓]", "Select"),
                hint("[+]", "Add"),
                hint("[-]", "Delete"),
                hint("[Tab]", "Next Page"),
                hint("[q]", "Quit"),
            ]
            .concat(),
        };
        Line::from(spans)
    }

    fn draw_genre_form(&self, frame: &mut Frame, area: Rect, form: &GenreForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Genre").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", GenreField::Name),
            form.build_line("Description", GenreField::Description),
            Line::from(""),
        ];
        lines.push(self.form_hint(
            form.error.as_deref(),
            "Enter to save • Tab to switch • Esc to cancel",
        ));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, len, row) = match form.active {
            GenreField::Name => ("Name: ", form.value_len(GenreField::Name), 0),
            GenreField::Description => (
                "Description: ",
                form.value_len(GenreField::Description),
                1,
            ),
        };
        frame.set_cursor_position((inner.x + (prefix.len() + len) as u16, inner.y + row));
    }

    fn draw_author_form(&self, frame: &mut Frame, area: Rect, form: &AuthorForm) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Author").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(),
            Line::from(""),
            self.form_hint(form.error.as_deref(), "Enter to save • Esc to cancel"),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + ("Name: ".len() + form.name.chars().count()) as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_record_form(&self, frame: &mut Frame, area: Rect, form: &RecordForm) {
        let state = self.store.state();
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Record").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let authors_label_style = if form.active == RecordField::Authors {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut lines = vec![
            form.title_line(),
            form.genre_line(state),
            Line::from(Span::styled("Authors:", authors_label_style)),
        ];
        lines.extend(form.author_lines(state));
        lines.push(Line::from(""));
        lines.push(self.form_hint(
            form.error.as_deref(),
            "Enter to save • Tab to switch • Esc to cancel",
        ));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        if form.active == RecordField::Title {
            let cursor_x = inner.x + ("Title: ".len() + form.title_len()) as u16;
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn form_hint(&self, error: Option<&str>, hint: &'static str) -> Line<'static> {
        match error {
            Some(error) => Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
        }
    }

    fn draw_confirm_delete(
        &self,
        frame: &mut Frame,
        area: Rect,
        kind: &str,
        confirm: &ConfirmDelete,
    ) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(format!("Delete {kind} \"{}\"?", confirm.name))];
        if confirm.referenced_by > 0 {
            lines.push(Line::from(Span::styled(
                format!(
                    "{} record(s) still reference it and will show N/A.",
                    confirm.referenced_by
                ),
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from("This action cannot be undone."));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::store::{CatalogState, SequentialIds, UNKNOWN};

    fn app() -> App {
        let store = CatalogStore::with_state(CatalogState::seed(), SequentialIds::new("new"));
        App::new(store, &AppConfig::default())
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            app.handle_key(*code).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn status_text(app: &App) -> Option<&str> {
        app.status.as_ref().map(|status| status.text.as_str())
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn quit_from_dashboard() {
        assert!(app().handle_key(KeyCode::Char('q')).unwrap());
        assert!(app().handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn escape_on_a_page_returns_home() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.tab, Tab::Genres);
        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert_eq!(app.tab, Tab::Dashboard);
    }

    #[test]
    fn adding_a_genre_dispatches_once_valid() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('+')]);
        type_text(&mut app, "Jazz");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "short");
        press(&mut app, &[KeyCode::Enter]);

        assert!(matches!(app.mode, Mode::AddingGenre(_)));
        assert_eq!(status_text(&app), Some("Description must be at least 10 characters."));
        assert_eq!(app.state().genres.len(), 4);

        type_text(&mut app, " and long enough");
        press(&mut app, &[KeyCode::Enter]);

        assert!(matches!(app.mode, Mode::Normal));
        let genres = &app.state().genres;
        assert_eq!(genres.len(), 5);
        assert_eq!(genres[4].name, "Jazz");
        assert_eq!(app.genres.selected, 4);
        assert_eq!(status_text(&app), Some("Added genre \"Jazz\"."));
    }

    #[test]
    fn cancelling_a_form_leaves_the_catalog_alone() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('4'), KeyCode::Char('+')]);
        type_text(&mut app, "Gal Costa");
        press(&mut app, &[KeyCode::Esc]);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.state().authors.len(), 1);
        assert_eq!(status_text(&app), Some("Add author cancelled."));
    }

    #[test]
    fn deleting_a_genre_requires_confirmation() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Down, KeyCode::Char('-')]);

        match &app.mode {
            Mode::ConfirmGenreDelete(confirm) => {
                assert_eq!(confirm.id, "2");
                assert_eq!(confirm.referenced_by, 1);
            }
            _ => panic!("expected a delete confirmation"),
        }

        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.state().genres.len(), 4);

        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('y')]);
        let state = app.state();
        assert_eq!(state.genres.len(), 3);
        assert_eq!(state.genre_name("2"), UNKNOWN);
        assert_eq!(state.records.len(), 4);
    }

    #[test]
    fn deleting_the_last_author_keeps_cursor_in_bounds() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('4'), KeyCode::Char('d'), KeyCode::Enter]);

        assert!(app.state().authors.is_empty());
        assert_eq!(app.authors.selected, 0);

        press(&mut app, &[KeyCode::Char('-')]);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status_text(&app), Some("No author selected to delete."));
    }

    #[test]
    fn records_cannot_be_deleted() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('-')]);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.state().records.len(), 4);
    }

    #[test]
    fn space_toggles_selected_record() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Down, KeyCode::Down]);
        press(&mut app, &[KeyCode::Char(' ')]);

        assert!(app.state().record("3").unwrap().active);
        assert_eq!(status_text(&app), Some("Status of \"Transa\" changed."));

        press(&mut app, &[KeyCode::Enter]);
        assert!(!app.state().record("3").unwrap().active);
    }

    #[test]
    fn adding_a_record_goes_through_the_pickers() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('+')]);
        type_text(&mut app, "Test");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(status_text(&app), Some("Please select a genre."));

        press(&mut app, &[KeyCode::Tab, KeyCode::Right, KeyCode::Enter]);
        assert_eq!(status_text(&app), Some("Please select at least one author."));

        press(&mut app, &[KeyCode::Tab, KeyCode::Char(' '), KeyCode::Enter]);
        assert!(matches!(app.mode, Mode::Normal));

        let record = app.state().records.last().unwrap();
        assert_eq!(record.id, "new-1");
        assert_eq!(record.title, "Test");
        assert_eq!(record.genre_id, "1");
        assert_eq!(record.author_ids, vec!["1".to_string()]);
        assert!(record.active);
        assert_eq!(app.records.selected, 4);
    }

    #[test]
    fn dashboard_shows_counts() {
        let app = app();
        let screen = render(&app);
        assert!(screen.contains("Vinyl Records"));
        assert!(screen.contains("Your modern partner"));
    }

    #[test]
    fn records_table_renders_dangling_genre_as_unknown() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::End]);
        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('y')]);
        press(&mut app, &[KeyCode::Char('3')]);

        let screen = render(&app);
        assert!(screen.contains("Chega de Saudade"));
        assert!(screen.contains("Caetano Veloso"));
        assert!(screen.contains("N/A"));
        assert!(screen.contains("Inactive"));
    }

    #[test]
    fn record_form_renders_author_checkboxes() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('+'), KeyCode::Tab, KeyCode::Tab]);
        press(&mut app, &[KeyCode::Char(' ')]);

        let screen = render(&app);
        assert!(screen.contains("[x] Caetano Veloso"));
    }
}
