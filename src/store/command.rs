/// Payload for [`Command::AddGenre`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
    pub description: String,
}

/// Payload for [`Command::AddAuthor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
}

/// Payload for [`Command::AddRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub genre_id: String,
    pub author_ids: Vec<String>,
}

/// Every mutation the catalog accepts. There is no other way to change the
/// store's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddGenre(NewGenre),
    DeleteGenre { id: String },
    AddAuthor(NewAuthor),
    DeleteAuthor { id: String },
    AddRecord(NewRecord),
    ToggleRecordStatus { id: String },
}

impl Command {
    /// Short name used when tracing dispatched commands.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::AddGenre(_) => "add_genre",
            Command::DeleteGenre { .. } => "delete_genre",
            Command::AddAuthor(_) => "add_author",
            Command::DeleteAuthor { .. } => "delete_author",
            Command::AddRecord(_) => "add_record",
            Command::ToggleRecordStatus { .. } => "toggle_record_status",
        }
    }
}
