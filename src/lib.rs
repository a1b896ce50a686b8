//! Core library surface for the Record Shop Manager TUI application.
//!
//! The catalog store is usable on its own; the `ui` module is one consumer of
//! it that renders the catalog in a terminal.
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

pub use config::AppConfig;
pub use logging::init_logging;

/// The three domain types the store manages.
pub use models::{Author, Genre, VinylRecord};

pub use store::{CatalogState, CatalogStore, Command};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
