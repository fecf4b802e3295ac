//! Core of a personal book catalog: immutable `Book` records, the delimited
//! text file they persist to, a write-through store, and the search filter a
//! presentation layer renders from.
//!
//! Rendering, dialogs and file pickers live outside this crate and call in
//! through `Catalog` (or `Store` and `query::filter` directly).
pub mod catalog;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;

/// Convenience re-exports for the persistence layer. `main.rs` uses these to
/// locate the catalog file and bring it up with sample data on first run.
pub use db::{load_or_seed, CatalogConfig, Store};

/// Domain types that every other layer passes around.
pub use models::{Book, BookDraft, BookField, SortKey};

pub use catalog::Catalog;
pub use error::{CatalogError, FieldViolation, ValidationError, ViolationKind};
pub use query::{filter, CatalogView};
