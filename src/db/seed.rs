use anyhow::{Context, Result};
use tracing::info;

use super::location::CatalogConfig;
use super::store::Store;
use crate::models::Book;

/// Records written to a brand new catalog so the first launch is not empty.
const SAMPLES: &[(&str, &str, &str, i32, i32, f64)] = &[
    ("Hamlet", "William Shakespeare", "Drama", 1603, 342, 350.0),
    ("Pride and Prejudice", "Jane Austen", "Novel", 1813, 432, 420.5),
    ("Moby-Dick", "Herman Melville", "Adventure", 1851, 635, 610.0),
    ("Crime and Punishment", "Fyodor Dostoevsky", "Novel", 1866, 671, 540.9),
    ("The Master and Margarita", "Mikhail Bulgakov", "Fantasy", 1967, 480, 499.9),
    ("Dune", "Frank Herbert", "Science Fiction", 1965, 412, 715.0),
    ("One Hundred Years of Solitude", "Gabriel Garcia Marquez", "Magic Realism", 1967, 417, 560.0),
    ("The Name of the Rose", "Umberto Eco", "Mystery", 1980, 536, 649.99),
];

/// Sample records with ids `1..=N`.
pub fn sample_books() -> Vec<Book> {
    SAMPLES
        .iter()
        .zip(1..)
        .map(|(&(title, author, genre, year, pages, price), id)| {
            Book::from_trusted(id, title, author, genre, year, pages, price)
        })
        .collect()
}

/// Load the catalog, seeding and saving the sample records when it is empty.
pub fn load_or_seed(config: &CatalogConfig) -> Result<Store> {
    let mut store = Store::open(config.data_file()).context("failed to load catalog")?;

    if store.is_empty() {
        store
            .replace_all(sample_books())
            .context("failed to seed catalog")?;
        info!(count = store.len(), "Seeded empty catalog with sample books");
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::codec;
    use crate::models::BookDraft;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn samples_pass_validation() {
        for book in sample_books() {
            assert_eq!(book.with_fields(&BookDraft::from_book(&book)).unwrap(), book);
        }
    }

    #[test]
    fn sample_ids_are_sequential() {
        let ids: Vec<i64> = sample_books().iter().map(Book::id).collect();
        assert_eq!(ids, (1..=SAMPLES.len() as i64).collect::<Vec<_>>());
    }

    #[test]
    fn empty_catalog_is_seeded_and_saved() {
        let temp = TempDir::new().unwrap();
        let config = CatalogConfig::in_dir(temp.path());

        let store = load_or_seed(&config).unwrap();

        assert_eq!(store.books(), sample_books().as_slice());
        let text = fs::read_to_string(config.data_file()).unwrap();
        assert_eq!(codec::decode(&text), sample_books());
    }

    #[test]
    fn existing_catalog_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let config = CatalogConfig::in_dir(temp.path());
        fs::write(config.data_file(), "header\n4;Mine;Me;Diary;2020;10;1.0\n").unwrap();

        let store = load_or_seed(&config).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.books()[0].title(), "Mine");
    }
}
