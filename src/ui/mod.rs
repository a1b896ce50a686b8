//! Ratatui front-end: a home dashboard plus one table per catalog collection.
//! Every change to the catalog goes through `CatalogStore::dispatch`.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
