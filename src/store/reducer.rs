use crate::models::{Author, Genre, VinylRecord};

use super::command::{Command, NewAuthor, NewGenre, NewRecord};
use super::ids::{IdGenerator, UuidIds};
use super::state::CatalogState;

/// Apply `command` to `state` and return the resulting snapshot.
///
/// Missing ids are not errors: deletes and toggles that match nothing return
/// an identical copy. Deletes never cascade, so records may be left pointing
/// at genres or authors that no longer exist.
pub fn reduce(state: &CatalogState, command: Command, ids: &mut dyn IdGenerator) -> CatalogState {
    let mut next = state.clone();
    match command {
        Command::AddGenre(NewGenre { name, description }) => {
            next.genres.push(Genre {
                id: ids.next_id(),
                name,
                description,
            });
        }
        Command::DeleteGenre { id } => {
            next.genres.retain(|genre| genre.id != id);
        }
        Command::AddAuthor(NewAuthor { name }) => {
            next.authors.push(Author {
                id: ids.next_id(),
                name,
            });
        }
        Command::DeleteAuthor { id } => {
            next.authors.retain(|author| author.id != id);
        }
        Command::AddRecord(NewRecord {
            title,
            genre_id,
            author_ids,
        }) => {
            next.records.push(VinylRecord {
                id: ids.next_id(),
                title,
                genre_id,
                author_ids,
                active: true,
            });
        }
        Command::ToggleRecordStatus { id } => {
            if let Some(record) = next.records.iter_mut().find(|record| record.id == id) {
                record.active = !record.active;
            }
        }
    }
    next
}

/// Owner of the catalog for one session. It is created once at startup and
/// handed to whoever renders it; there is no shared global instance.
pub struct CatalogStore {
    state: CatalogState,
    ids: Box<dyn IdGenerator>,
}

impl CatalogStore {
    /// A store holding the seed dataset with UUID ids for new entities.
    pub fn new() -> Self {
        Self::with_state(CatalogState::seed(), UuidIds)
    }

    pub fn with_state(state: CatalogState, ids: impl IdGenerator + 'static) -> Self {
        Self {
            state,
            ids: Box::new(ids),
        }
    }

    /// Current snapshot. Re-read after every dispatch.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn dispatch(&mut self, command: Command) {
        self.state = reduce(&self.state, command, self.ids.as_mut());
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
