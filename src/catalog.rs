use std::io::Write;

use anyhow::Result as AnyResult;

use crate::db::{load_or_seed, CatalogConfig, Store};
use crate::error::Result;
use crate::models::{Book, BookDraft, SortKey};
use crate::query::CatalogView;

/// The surface a presentation layer drives: the store plus the active search.
/// The visible list is never stored; `visible` derives it on every call.
#[derive(Debug)]
pub struct Catalog {
    store: Store,
    view: CatalogView,
}

impl Catalog {
    /// Wrap an already loaded store with an empty search.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            view: CatalogView::default(),
        }
    }

    /// Load the configured catalog, seeding sample books on first run.
    pub fn open(config: &CatalogConfig) -> AnyResult<Self> {
        Ok(Self::new(load_or_seed(config)?))
    }

    /// Full collection in its current order.
    pub fn books(&self) -> &[Book] {
        self.store.books()
    }

    /// Books matching the current query.
    pub fn visible(&self) -> Vec<Book> {
        self.view.apply(self.store.books())
    }

    /// Search text currently applied to `visible`.
    pub fn query(&self) -> &str {
        self.view.query()
    }

    /// Replace the search text and return the books it now matches.
    pub fn set_query(&mut self, query: impl Into<String>) -> Vec<Book> {
        self.view.set_query(query);
        self.visible()
    }

    /// Create a record from raw form text. See [`Store::add`].
    pub fn add(&mut self, draft: &BookDraft) -> Result<Book> {
        self.store.add(draft)
    }

    /// Replace the record with `id` from raw form text. See [`Store::update`].
    pub fn update(&mut self, id: i64, draft: &BookDraft) -> Result<Book> {
        self.store.update(id, draft)
    }

    /// Delete the record with `id`, if present. See [`Store::remove`].
    pub fn remove(&mut self, id: i64) -> Result<Option<Book>> {
        self.store.remove(id)
    }

    /// Reorder the collection and hand back the refreshed visible list.
    pub fn sort_by(&mut self, key: SortKey) -> Vec<Book> {
        self.store.sort_by(key);
        self.visible()
    }

    /// Write the catalog text, in current order, to any destination.
    pub fn export_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.store.export_to(writer)
    }

    /// Underlying store, for read-only access to its path and load report.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
