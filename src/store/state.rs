use crate::models::{Author, Genre, VinylRecord};

/// Snapshot of the whole catalog. The reducer never edits a snapshot in
/// place; every dispatch produces a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub genres: Vec<Genre>,
    pub authors: Vec<Author>,
    pub records: Vec<VinylRecord>,
}

impl CatalogState {
    /// The fixed dataset every session starts from.
    pub fn seed() -> Self {
        let genre = |id: &str, name: &str, description: &str| Genre {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        };
        let record = |id: &str, title: &str, genre_id: &str, active: bool| VinylRecord {
            id: id.to_string(),
            title: title.to_string(),
            genre_id: genre_id.to_string(),
            author_ids: vec!["1".to_string()],
            active,
        };

        Self {
            genres: vec![
                genre("1", "Samba", "Brazilian samba music, a symbol of the country."),
                genre(
                    "2",
                    "Bossa Nova",
                    "A fusion of samba and jazz, born in Rio de Janeiro.",
                ),
                genre(
                    "3",
                    "MPB",
                    "Brazilian Popular Music, a rich and diverse genre.",
                ),
                genre("4", "Rock", "Classic and alternative rock music."),
            ],
            authors: vec![Author {
                id: "1".to_string(),
                name: "Caetano Veloso".to_string(),
            }],
            records: vec![
                record("1", "Chega de Saudade", "2", true),
                record("2", "Dois", "4", true),
                record("3", "Transa", "3", false),
                record("4", "Elis & Tom", "3", true),
            ],
        }
    }
}
