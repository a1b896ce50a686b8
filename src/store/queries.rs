//! Read-only views derived from a [`CatalogState`]. None of these fail: a
//! reference that no longer resolves is reported as [`UNKNOWN`] or skipped.

use crate::models::{Author, Genre, VinylRecord};

use super::state::CatalogState;

/// Sentinel shown wherever a reference cannot be resolved.
pub const UNKNOWN: &str = "N/A";
/// Separator used by [`CatalogState::author_names`].
pub const DEFAULT_AUTHOR_SEPARATOR: &str = ", ";

/// Collection sizes shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub records: usize,
    pub genres: usize,
    pub authors: usize,
}

impl CatalogState {
    pub fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres.iter().find(|genre| genre.id == id)
    }

    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    pub fn record(&self, id: &str) -> Option<&VinylRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Number of records crediting `author_id`. Unknown authors simply have
    /// no records.
    pub fn record_count_for_author(&self, author_id: &str) -> usize {
        self.records
            .iter()
            .filter(|record| record.credits(author_id))
            .count()
    }

    /// Name of the genre, or [`UNKNOWN`] when it has been deleted.
    pub fn genre_name(&self, genre_id: &str) -> &str {
        self.genre(genre_id)
            .map(|genre| genre.name.as_str())
            .unwrap_or(UNKNOWN)
    }

    /// Comma separated author names. Unresolved ids are dropped; if nothing
    /// resolves the result is [`UNKNOWN`].
    pub fn author_names(&self, author_ids: &[String]) -> String {
        self.author_names_with(author_ids, DEFAULT_AUTHOR_SEPARATOR)
    }

    pub fn author_names_with(&self, author_ids: &[String], separator: &str) -> String {
        let names: Vec<&str> = author_ids
            .iter()
            .filter_map(|id| self.author(id))
            .map(|author| author.name.as_str())
            .collect();

        if names.is_empty() {
            UNKNOWN.to_string()
        } else {
            names.join(separator)
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.records.len(),
            genres: self.genres.len(),
            authors: self.authors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_author_is_credited_on_every_record() {
        let state = CatalogState::seed();
        assert_eq!(state.record_count_for_author("1"), 4);
    }

    #[test]
    fn unknown_author_has_no_records() {
        let state = CatalogState::seed();
        assert_eq!(state.record_count_for_author("missing"), 0);
    }

    #[test]
    fn genre_name_resolves_or_reports_unknown() {
        let state = CatalogState::seed();
        assert_eq!(state.genre_name("2"), "Bossa Nova");
        assert_eq!(state.genre_name("99"), UNKNOWN);
    }

    #[test]
    fn author_names_skip_dangling_ids() {
        let mut state = CatalogState::seed();
        state.authors.push(Author {
            id: "2".to_string(),
            name: "Gilberto Gil".to_string(),
        });

        let ids = vec!["1".to_string(), "ghost".to_string(), "2".to_string()];
        assert_eq!(state.author_names(&ids), "Caetano Veloso, Gilberto Gil");
        assert_eq!(state.author_names_with(&ids, " / "), "Caetano Veloso / Gilberto Gil");
    }

    #[test]
    fn author_names_fall_back_when_nothing_resolves() {
        let state = CatalogState::seed();
        assert_eq!(state.author_names(&[]), UNKNOWN);
        assert_eq!(state.author_names(&["ghost".to_string()]), UNKNOWN);
    }

    #[test]
    fn stats_count_each_collection() {
        let stats = CatalogState::seed().stats();
        assert_eq!(
            stats,
            CatalogStats {
                records: 4,
                genres: 4,
                authors: 1,
            }
        );
    }
}
