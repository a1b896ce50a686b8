//! Domain models for the record shop catalog. These are plain value types:
//! relationships are expressed only through id strings, so nothing here holds
//! a pointer back into the store. Anything that follows a reference has to be
//! ready for it to no longer resolve.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A musical genre records can be filed under.
pub struct Genre {
    /// Opaque identifier, unique within the genre collection.
    pub id: String,
    /// Display name shown in tables and pickers.
    pub name: String,
    /// Free-text blurb shown next to the name.
    pub description: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A recording artist credited on one or more records.
pub struct Author {
    pub id: String,
    pub name: String,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A vinyl record on the shop's shelves.
pub struct VinylRecord {
    pub id: String,
    pub title: String,
    /// Genre this record is filed under. May dangle after the genre is
    /// deleted.
    pub genre_id: String,
    /// Credited authors, in the order they were selected. Entries may dangle
    /// after an author is deleted.
    pub author_ids: Vec<String>,
    /// Whether the record is currently offered in the shop.
    pub active: bool,
}

impl VinylRecord {
    /// Badge text used by the records table.
    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// True when `author_id` is credited on this record.
    pub fn credits(&self, author_id: &str) -> bool {
        self.author_ids.iter().any(|id| id == author_id)
    }
}

impl fmt::Display for VinylRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
