use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::codec;
use crate::error::{CatalogError, Result};
use crate::models::{Book, BookDraft, SortKey};

/// Owner of the authoritative book list and the catalog file behind it.
///
/// Every mutation builds the next collection, rewrites the whole file, and
/// only then swaps the new collection in. A failed write leaves both the file
/// and the in-memory list as they were.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    books: Vec<Book>,
    skipped_on_load: usize,
}

impl Store {
    /// Point a store at a catalog file without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            books: Vec::new(),
            skipped_on_load: 0,
        }
    }

    /// Create a store and immediately load the catalog file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Store::new(path);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory collection with the file contents. A missing file
    /// is created holding only the header; any other I/O failure propagates.
    pub fn load(&mut self) -> Result<&[Book]> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                write_atomically(&self.path, &codec::encode(&[]))?;
                info!(path = %self.path.display(), "Created empty catalog file");
                self.books.clear();
                self.skipped_on_load = 0;
                return Ok(&self.books);
            }
            Err(err) => return Err(CatalogError::persistence(&self.path, err)),
        };

        let report = codec::decode_bytes_with_report(&bytes);
        if !report.skipped_lines.is_empty() {
            warn!(
                path = %self.path.display(),
                skipped = report.skipped_lines.len(),
                lines = ?report.skipped_lines,
                "Dropped malformed catalog lines"
            );
        }
        info!(
            path = %self.path.display(),
            count = report.books.len(),
            "Loaded catalog"
        );

        self.skipped_on_load = report.skipped_lines.len();
        self.books = report.books;
        Ok(&self.books)
    }

    /// Rewrite the whole catalog file from the current collection.
    pub fn save(&self) -> Result<()> {
        self.persist(&self.books)
    }

    /// Validate, assign the next id, append, and persist.
    pub fn add(&mut self, draft: &BookDraft) -> Result<Book> {
        let id = self.next_id()?;
        let book = Book::new(id, draft)?;

        let mut next = self.books.clone();
        next.push(book.clone());
        self.commit(next)?;

        debug!(id = book.id(), "Added book");
        Ok(book)
    }

    /// Validate and replace the book with `id`, keeping its position.
    pub fn update(&mut self, id: i64, draft: &BookDraft) -> Result<Book> {
        // Validation runs first so a bad draft is reported even for unknown ids.
        let updated = Book::new(id, draft)?;
        let index = self
            .position(id)
            .ok_or(CatalogError::NotFound { id })?;

        let mut next = self.books.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        debug!(id, "Updated book");
        Ok(updated)
    }

    /// Delete the book with `id`. Unknown ids are a no-op and skip the rewrite.
    pub fn remove(&mut self, id: i64) -> Result<Option<Book>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.books.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        debug!(id, "Removed book");
        Ok(Some(removed))
    }

    /// Stable in-place reorder. Not persisted: the file keeps its order until
    /// the next mutation rewrites it.
    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Title => self.books.sort_by_cached_key(|b| b.title().to_lowercase()),
            SortKey::Author => self.books.sort_by_cached_key(|b| b.author().to_lowercase()),
            SortKey::Year => self.books.sort_by_key(Book::year),
            SortKey::Price => self.books.sort_by(Book::cmp_by_price),
        }
        debug!(?key, "Sorted catalog");
    }

    /// Write the catalog text for the current collection order to `writer`.
    pub fn export_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        codec::encode_to(writer, &self.books).map_err(CatalogError::Export)
    }

    /// Current collection, in session order (file order unless re-sorted).
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a single record by id.
    pub fn get(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the collection holds no records. Drives first-run seeding.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Catalog file this store reads and rewrites.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines the last `load` had to drop.
    pub fn skipped_on_load(&self) -> usize {
        self.skipped_on_load
    }

    /// Id the next `add` will assign: one past the highest live id. Fails when
    /// a loaded record already holds `i64::MAX`.
    pub fn next_id(&self) -> Result<i64> {
        let highest = self.books.iter().map(Book::id).max().unwrap_or(0);
        highest
            .checked_add(1)
            .ok_or(CatalogError::IdsExhausted { highest })
    }

    /// Seed an empty collection with pre-built records and persist them.
    pub(crate) fn replace_all(&mut self, books: Vec<Book>) -> Result<()> {
        self.commit(books)
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.books.iter().position(|b| b.id() == id)
    }

    fn commit(&mut self, next: Vec<Book>) -> Result<()> {
        self.persist(&next)?;
        self.books = next;
        Ok(())
    }

    fn persist(&self, books: &[Book]) -> Result<()> {
        write_atomically(&self.path, &codec::encode(books))?;
        debug!(path = %self.path.display(), count = books.len(), "Saved catalog");
        Ok(())
    }
}

/// Replace `path` as a whole: write a sibling temp file, then rename over it.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents).map_err(|err| CatalogError::persistence(&temp_path, err))?;
    fs::rename(&temp_path, path).map_err(|err| CatalogError::persistence(path, err))
}
