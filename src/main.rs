//! Binary entry point: bring up logging, locate the catalog file under the
//! user's home, seed it on first run, and print the catalog text to stdout.
use std::io;

use anyhow::Context;
use book_catalog::logging::init_tracing;
use book_catalog::{load_or_seed, CatalogConfig};

/// Returning a `Result` surfaces fatal startup problems (an unwritable home
/// directory, a catalog path that is a directory) with their full context.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CatalogConfig::from_home()?;
    config.ensure_data_dir()?;
    let store = load_or_seed(&config)?;

    let stdout = io::stdout();
    store
        .export_to(&mut stdout.lock())
        .context("failed to write catalog to stdout")
}
