//! In-memory catalog store split across logical submodules.

mod command;
mod ids;
mod queries;
mod reducer;
mod state;

pub use command::{Command, NewAuthor, NewGenre, NewRecord};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use queries::{CatalogStats, DEFAULT_AUTHOR_SEPARATOR, UNKNOWN};
pub use reducer::{reduce, CatalogStore};
pub use state::CatalogState;
