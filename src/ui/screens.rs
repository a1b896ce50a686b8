use crate::store::CatalogState;

/// Top-level pages reachable from the header tabs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Tab {
    Dashboard,
    Genres,
    Records,
    Authors,
}

impl Tab {
    pub(crate) const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Genres, Tab::Records, Tab::Authors];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Home",
            Tab::Genres => "Genres",
            Tab::Records => "Records",
            Tab::Authors => "Authors",
        }
    }

    pub(crate) fn index(self) -> usize {
        Tab::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub(crate) fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub(crate) fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Map the digit shortcuts `1`..`4` to tabs.
    pub(crate) fn from_digit(ch: char) -> Option<Tab> {
        let idx = ch.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|idx| Tab::ALL.get(idx).copied())
    }
}

/// Selected row within one of the tables.
#[derive(Default, Debug, Clone, Copy)]
pub(crate) struct TableCursor {
    pub(crate) selected: usize,
}

impl TableCursor {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let new = (self.selected as isize + offset).clamp(0, len as isize - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Row of the records table with every reference already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordRow {
    pub(crate) title: String,
    pub(crate) genre: String,
    pub(crate) authors: String,
    pub(crate) active: bool,
}

/// Row of the authors table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthorRow {
    pub(crate) name: String,
    pub(crate) records: usize,
}

pub(crate) fn record_rows(state: &CatalogState, separator: &str) -> Vec<RecordRow> {
    state
        .records
        .iter()
        .map(|record| RecordRow {
            title: record.title.clone(),
            genre: state.genre_name(&record.genre_id).to_string(),
            authors: state.author_names_with(&record.author_ids, separator),
            active: record.active,
        })
        .collect()
}

pub(crate) fn author_rows(state: &CatalogState) -> Vec<AuthorRow> {
    state
        .authors
        .iter()
        .map(|author| AuthorRow {
            name: author.name.clone(),
            records: state.record_count_for_author(&author.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UNKNOWN;

    #[test]
    fn tabs_cycle_in_both_directions() {
        assert_eq!(Tab::Dashboard.next(), Tab::Genres);
        assert_eq!(Tab::Authors.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.previous(), Tab::Authors);
        assert_eq!(Tab::from_digit('3'), Some(Tab::Records));
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('5'), None);
    }

    #[test]
    fn cursor_stays_within_the_table() {
        let mut cursor = TableCursor::default();
        cursor.move_selection(-3, 4);
        assert_eq!(cursor.selected, 0);
        cursor.move_selection(10, 4);
        assert_eq!(cursor.selected, 3);
        cursor.ensure_in_bounds(2);
        assert_eq!(cursor.selected, 1);
        cursor.ensure_in_bounds(0);
        assert_eq!(cursor.selected, 0);
    }

    #[test]
    fn record_rows_resolve_references() {
        let mut state = CatalogState::seed();
        state.genres.retain(|genre| genre.id != "4");

        let rows = record_rows(&state, ", ");
        assert_eq!(rows[0].genre, "Bossa Nova");
        assert_eq!(rows[0].authors, "Caetano Veloso");
        assert_eq!(rows[1].genre, UNKNOWN);
        assert!(!rows[2].active);
    }

    #[test]
    fn author_rows_count_records() {
        let rows = author_rows(&CatalogState::seed());
        assert_eq!(
            rows,
            vec![AuthorRow {
                name: "Caetano Veloso".to_string(),
                records: 4,
            }]
        );
    }
}
