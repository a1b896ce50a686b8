use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use thiserror::Error;

use crate::store::{CatalogState, NewAuthor, NewGenre, NewRecord};

/// Minimum length, in characters, of names and titles.
pub(crate) const MIN_NAME_LEN: usize = 2;
/// Minimum length, in characters, of a genre description.
pub(crate) const MIN_DESCRIPTION_LEN: usize = 10;

/// Reasons a form refuses to submit. These never reach the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("Name must be at least 2 characters.")]
    NameTooShort,
    #[error("Description must be at least 10 characters.")]
    DescriptionTooShort,
    #[error("Title must be at least 2 characters.")]
    TitleTooShort,
    #[error("Please select a genre.")]
    GenreMissing,
    #[error("Please select at least one author.")]
    AuthorsMissing,
}

fn long_enough(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Render `Label: value` with the active field highlighted.
fn field_line(field_name: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

/// Fields of the genre form.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum GenreField {
    #[default]
    Name,
    Description,
}

#[derive(Default, Clone, Debug)]
pub(crate) struct GenreForm {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) active: GenreField,
    pub(crate) error: Option<String>,
}

impl GenreForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            GenreField::Name => GenreField::Description,
            GenreField::Description => GenreField::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            GenreField::Name => self.name.push(ch),
            GenreField::Description => self.description.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            GenreField::Name => {
                self.name.pop();
            }
            GenreField::Description => {
                self.description.pop();
            }
        }
    }

    pub(crate) fn parse_inputs(&self) -> Result<NewGenre, ValidationError> {
        if !long_enough(&self.name, MIN_NAME_LEN) {
            return Err(ValidationError::NameTooShort);
        }
        if !long_enough(&self.description, MIN_DESCRIPTION_LEN) {
            return Err(ValidationError::DescriptionTooShort);
        }
        Ok(NewGenre {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }

    pub(crate) fn build_line(&self, field_name: &str, field: GenreField) -> Line<'static> {
        let value = match field {
            GenreField::Name => &self.name,
            GenreField::Description => &self.description,
        };
        field_line(field_name, value, self.active == field)
    }

    pub(crate) fn value_len(&self, field: GenreField) -> usize {
        match field {
            GenreField::Name => self.name.chars().count(),
            GenreField::Description => self.description.chars().count(),
        }
    }
}

#[derive(Default, Clone, Debug)]
pub(crate) struct AuthorForm {
    pub(crate) name: String,
    pub(crate) error: Option<String>,
}

impl AuthorForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.name.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.name.pop();
    }

    pub(crate) fn parse_inputs(&self) -> Result<NewAuthor, ValidationError> {
        if !long_enough(&self.name, MIN_NAME_LEN) {
            return Err(ValidationError::NameTooShort);
        }
        Ok(NewAuthor {
            name: self.name.trim().to_string(),
        })
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line("Name", &self.name, true)
    }
}

/// Fields of the record form. Genre and authors are pickers over the current
/// catalog rather than free text.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum RecordField {
    #[default]
    Title,
    Genre,
    Authors,
}

#[derive(Default, Clone, Debug)]
pub(crate) struct RecordForm {
    pub(crate) title: String,
    pub(crate) genre_id: Option<String>,
    /// Highlighted row in the author picker.
    pub(crate) author_cursor: usize,
    /// Selected authors in the order they were picked.
    pub(crate) author_ids: Vec<String>,
    pub(crate) active: RecordField,
    pub(crate) error: Option<String>,
}

impl RecordForm {
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            RecordField::Title => RecordField::Genre,
            RecordField::Genre => RecordField::Authors,
            RecordField::Authors => RecordField::Title,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            RecordField::Title => RecordField::Authors,
            RecordField::Genre => RecordField::Title,
            RecordField::Authors => RecordField::Genre,
        };
    }

    /// Typed characters go to the title. In the author picker a space toggles
    /// the highlighted author instead.
    pub(crate) fn push_char(&mut self, ch: char, state: &CatalogState) -> bool {
        match self.active {
            RecordField::Title if !ch.is_control() => {
                self.title.push(ch);
                true
            }
            RecordField::Authors if ch == ' ' => {
                self.toggle_author(state);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn backspace(&mut self) {
        if self.active == RecordField::Title {
            self.title.pop();
        }
    }

    /// Step through the genre list, wrapping at either end.
    pub(crate) fn cycle_genre(&mut self, offset: isize, state: &CatalogState) {
        let len = state.genres.len();
        if len == 0 {
            self.genre_id = None;
            return;
        }
        let current = self
            .genre_id
            .as_deref()
            .and_then(|id| state.genres.iter().position(|genre| genre.id == id));
        let next = match current {
            Some(idx) => (idx as isize + offset).rem_euclid(len as isize) as usize,
            None if offset < 0 => len - 1,
            None => 0,
        };
        self.genre_id = Some(state.genres[next].id.clone());
    }

    pub(crate) fn move_author_cursor(&mut self, offset: isize, state: &CatalogState) {
        let len = state.authors.len();
        if len == 0 {
            self.author_cursor = 0;
            return;
        }
        let next = (self.author_cursor as isize + offset).clamp(0, len as isize - 1);
        self.author_cursor = next as usize;
    }

    pub(crate) fn toggle_author(&mut self, state: &CatalogState) {
        let Some(author) = state.authors.get(self.author_cursor) else {
            return;
        };
        if let Some(pos) = self.author_ids.iter().position(|id| *id == author.id) {
            self.author_ids.remove(pos);
        } else {
            self.author_ids.push(author.id.clone());
        }
    }

    pub(crate) fn is_author_selected(&self, author_id: &str) -> bool {
        self.author_ids.iter().any(|id| id == author_id)
    }

    pub(crate) fn parse_inputs(&self, state: &CatalogState) -> Result<NewRecord, ValidationError> {
        if !long_enough(&self.title, MIN_NAME_LEN) {
            return Err(ValidationError::TitleTooShort);
        }
        let genre_id = self
            .genre_id
            .as_deref()
            .filter(|id| state.genre(id).is_some())
            .ok_or(ValidationError::GenreMissing)?;
        let author_ids: Vec<String> = self
            .author_ids
            .iter()
            .filter(|id| state.author(id).is_some())
            .cloned()
            .collect();
        if author_ids.is_empty() {
            return Err(ValidationError::AuthorsMissing);
        }
        Ok(NewRecord {
            title: self.title.trim().to_string(),
            genre_id: genre_id.to_string(),
            author_ids,
        })
    }

    pub(crate) fn title_line(&self) -> Line<'static> {
        field_line("Title", &self.title, self.active == RecordField::Title)
    }

    pub(crate) fn genre_line(&self, state: &CatalogState) -> Line<'static> {
        let value = self
            .genre_id
            .as_deref()
            .map(|id| format!("< {} >", state.genre_name(id)))
            .unwrap_or_default();
        field_line("Genre", &value, self.active == RecordField::Genre)
    }

    /// One line per author with a checkbox, the cursor row underlined when the
    /// picker has focus.
    pub(crate) fn author_lines(&self, state: &CatalogState) -> Vec<Line<'static>> {
        if state.authors.is_empty() {
            return vec![Line::from(Span::styled(
                "  No authors yet.",
                Style::default().fg(Color::DarkGray),
            ))];
        }
        state
            .authors
            .iter()
            .enumerate()
            .map(|(idx, author)| {
                let mark = if self.is_author_selected(&author.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let mut style = Style::default();
                if self.active == RecordField::Authors && idx == self.author_cursor {
                    style = style.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED);
                }
                Line::from(Span::styled(format!("  {mark} {}", author.name), style))
            })
            .collect()
    }

    pub(crate) fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}

/// Pending deletion of a genre or author, shown as a yes/no dialog.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmDelete {
    pub(crate) id: String,
    pub(crate) name: String,
    /// Records that will be left pointing at the deleted entity.
    pub(crate) referenced_by: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    fn typed(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn genre_form_enforces_minimum_lengths() {
        let mut form = GenreForm {
            name: typed("J"),
            description: typed("0123456789"),
            ..GenreForm::default()
        };
        assert_eq!(form.parse_inputs(), Err(ValidationError::NameTooShort));

        form.name = typed("Jz");
        assert!(form.parse_inputs().is_ok());

        form.description = typed("012345678");
        assert_eq!(form.parse_inputs(), Err(ValidationError::DescriptionTooShort));
    }

    #[test]
    fn genre_form_trims_before_counting() {
        let form = GenreForm {
            name: typed("  J  "),
            description: typed("American jazz music styles."),
            ..GenreForm::default()
        };
        assert_eq!(form.parse_inputs(), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn genre_form_counts_characters_not_bytes() {
        let form = GenreForm {
            name: typed("É"),
            description: typed("Música de samba"),
            ..GenreForm::default()
        };
        assert_eq!(form.parse_inputs(), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn typing_follows_the_active_field() {
        let mut form = GenreForm::default();
        form.push_char('R');
        form.toggle_field();
        form.push_char('x');
        form.push_char('y');
        form.backspace();
        assert_eq!(form.name, "R");
        assert_eq!(form.description, "x");
        assert!(!form.push_char('\n'));
    }

    #[test]
    fn author_form_trims_name() {
        let form = AuthorForm {
            name: typed("  Gal Costa "),
            error: None,
        };
        assert_eq!(form.parse_inputs().unwrap().name, "Gal Costa");
    }

    #[test]
    fn record_form_requires_genre_and_author() {
        let state = CatalogState::seed();
        let mut form = RecordForm {
            title: typed("Tropicália"),
            ..RecordForm::default()
        };
        assert_eq!(form.parse_inputs(&state), Err(ValidationError::GenreMissing));

        form.cycle_genre(1, &state);
        assert_eq!(form.parse_inputs(&state), Err(ValidationError::AuthorsMissing));

        form.toggle_author(&state);
        let record = form.parse_inputs(&state).unwrap();
        assert_eq!(record.genre_id, "1");
        assert_eq!(record.author_ids, vec!["1".to_string()]);
    }

    #[test]
    fn record_form_rejects_short_title() {
        let state = CatalogState::seed();
        let form = RecordForm {
            title: typed("T"),
            genre_id: Some(typed("1")),
            author_ids: vec![typed("1")],
            ..RecordForm::default()
        };
        assert_eq!(form.parse_inputs(&state), Err(ValidationError::TitleTooShort));
    }

    #[test]
    fn genre_picker_wraps_around() {
        let state = CatalogState::seed();
        let mut form = RecordForm::default();
        form.cycle_genre(-1, &state);
        assert_eq!(form.genre_id.as_deref(), Some("4"));
        form.cycle_genre(1, &state);
        assert_eq!(form.genre_id.as_deref(), Some("1"));
    }

    #[test]
    fn author_picker_keeps_selection_order() {
        let mut state = CatalogState::seed();
        state.authors.push(Author {
            id: typed("2"),
            name: typed("Gilberto Gil"),
        });
        let mut form = RecordForm {
            active: RecordField::Authors,
            ..RecordForm::default()
        };

        form.move_author_cursor(1, &state);
        form.push_char(' ', &state);
        form.move_author_cursor(-1, &state);
        form.push_char(' ', &state);
        assert_eq!(form.author_ids, vec![typed("2"), typed("1")]);

        form.push_char(' ', &state);
        assert_eq!(form.author_ids, vec![typed("2")]);
    }

    #[test]
    fn deleted_picks_do_not_reach_the_command() {
        let mut state = CatalogState::seed();
        let form = RecordForm {
            title: typed("Transa"),
            genre_id: Some(typed("3")),
            author_ids: vec![typed("1")],
            ..RecordForm::default()
        };
        state.authors.clear();
        assert_eq!(form.parse_inputs(&state), Err(ValidationError::AuthorsMissing));
    }
}
