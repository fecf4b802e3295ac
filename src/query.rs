//! Read-only views over the collection. Nothing here owns records: the visible
//! list is recomputed from the full collection and the current query each time
//! it is asked for, so it cannot drift out of sync with the store.

use crate::models::Book;

/// Books whose search key contains `query`, case-insensitively, in their
/// original relative order. A blank query returns everything.
pub fn filter(books: &[Book], query: &str) -> Vec<Book> {
    let needle = normalize(query);
    if needle.is_empty() {
        return books.to_vec();
    }

    books
        .iter()
        .filter(|book| matches(book, &needle))
        .cloned()
        .collect()
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

fn matches(book: &Book, needle: &str) -> bool {
    book.search_key().to_lowercase().contains(needle)
}

/// The current search of a presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    query: String,
}

impl CatalogView {
    /// Start a view with an initial search.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Search text as entered, before trimming or lowercasing.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search text. Nothing is recomputed until `apply`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Re-apply the current query to `books`.
    pub fn apply(&self, books: &[Book]) -> Vec<Book> {
        filter(books, &self.query)
    }
}
