//! Binary entry point: load configuration, start logging, seed the catalog and
//! drive the Ratatui event loop until the user exits.
use anyhow::Context;
use record_shop_manager::{init_logging, run_app, App, AppConfig, CatalogStore};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config)?;

    let store = CatalogStore::new();
    tracing::info!(
        genres = store.state().genres.len(),
        authors = store.state().authors.len(),
        records = store.state().records.len(),
        "catalog seeded"
    );

    let mut app = App::new(store, &config);
    run_app(&mut app)
}
