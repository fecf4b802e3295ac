//! Domain models for the catalog. `Book` is an immutable value: edits go
//! through `with_fields`, which hands back a new record carrying the same id.
//! There are two ways to build one. `Book::new` validates raw request text and
//! is what every create/edit flow uses. `Book::from_trusted` skips the range
//! checks and is reserved for the codec, which rebuilds records that were
//! already accepted once.

use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{FieldViolation, ValidationError, ViolationKind};

/// Accepted publication years.
pub const YEAR_RANGE: RangeInclusive<i32> = 1564..=2025;
/// Accepted page counts.
pub const PAGES_RANGE: RangeInclusive<i32> = 1..=100_100;
/// Accepted prices.
pub const PRICE_RANGE: RangeInclusive<f64> = 0.0..=2_385_768_000.0;

/// Names of the editable fields, in the order violations are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Title,
    Author,
    Genre,
    Year,
    Pages,
    Price,
}

impl BookField {
    /// Human label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Genre => "Genre",
            BookField::Year => "Year",
            BookField::Pages => "Pages",
            BookField::Price => "Price",
        }
    }

    pub(crate) fn range_hint(self) -> String {
        match self {
            BookField::Year => format!(
                "between {} and {}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ),
            BookField::Pages => format!(
                "between {} and {}",
                PAGES_RANGE.start(),
                PAGES_RANGE.end()
            ),
            BookField::Price => format!(
                "between {} and {}",
                format_price(*PRICE_RANGE.start()),
                format_price(*PRICE_RANGE.end())
            ),
            BookField::Title | BookField::Author | BookField::Genre => "non-blank".to_string(),
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keys the collection can be reordered by. Text keys compare
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    Year,
    Price,
}

/// Raw create/edit request as typed by the user. Nothing here is parsed yet;
/// `Book::new` does the parsing so presentation code never has to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
    pub pages: String,
    pub price: String,
}

impl BookDraft {
    /// Pre-fill an edit request from an existing record.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year.to_string(),
            pages: book.pages.to_string(),
            price: format_price(book.price),
        }
    }
}

/// Fields of a draft that survived parsing and range checks.
struct CheckedFields {
    title: String,
    author: String,
    genre: String,
    year: i32,
    pages: i32,
    price: f64,
}

impl CheckedFields {
    fn parse(draft: &BookDraft) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let title = required_text(&draft.title, BookField::Title, &mut violations);
        let author = required_text(&draft.author, BookField::Author, &mut violations);
        let genre = required_text(&draft.genre, BookField::Genre, &mut violations);
        let year = ranged_number(&draft.year, BookField::Year, &YEAR_RANGE, &mut violations);
        let pages = ranged_number(&draft.pages, BookField::Pages, &PAGES_RANGE, &mut violations);
        let price = ranged_number(&draft.price, BookField::Price, &PRICE_RANGE, &mut violations);

        match (year, pages, price) {
            (Some(year), Some(pages), Some(price)) if violations.is_empty() => Ok(Self {
                title,
                author,
                genre,
                year,
                pages,
                price,
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }
}

fn required_text(raw: &str, field: BookField, violations: &mut Vec<FieldViolation>) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        violations.push(FieldViolation::new(field, ViolationKind::Blank));
    }
    trimmed.to_string()
}

fn ranged_number<T>(
    raw: &str,
    field: BookField,
    range: &RangeInclusive<T>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T>
where
    T: std::str::FromStr + PartialOrd,
{
    let trimmed = raw.trim();
    match trimmed.parse::<T>() {
        // NaN fails `contains`, which is what we want for prices.
        Ok(value) if range.contains(&value) => Some(value),
        Ok(_) => {
            violations.push(FieldViolation::new(
                field,
                ViolationKind::OutOfRange(trimmed.to_string()),
            ));
            None
        }
        Err(_) => {
            violations.push(FieldViolation::new(
                field,
                ViolationKind::NotANumber(trimmed.to_string()),
            ));
            None
        }
    }
}

/// Render a price the way the catalog file stores it: plain digits with a
/// `.` decimal point and at least one fractional digit.
pub fn format_price(price: f64) -> String {
    if price.is_finite() && price.fract() == 0.0 {
        format!("{price:.1}")
    } else {
        format!("{price}")
    }
}

/// One catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: i64,
    title: String,
    author: String,
    genre: String,
    year: i32,
    pages: i32,
    price: f64,
}

impl Book {
    /// Validated construction path. Every violated field is reported at once.
    pub fn new(id: i64, draft: &BookDraft) -> Result<Self, ValidationError> {
        let fields = CheckedFields::parse(draft)?;
        Ok(Self {
            id,
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            year: fields.year,
            pages: fields.pages,
            price: fields.price,
        })
    }

    /// Trusted construction path used when rebuilding records from the catalog
    /// file. Ranges are not re-checked: a stored year of 9999 loads as-is.
    pub(crate) fn from_trusted(
        id: i64,
        title: &str,
        author: &str,
        genre: &str,
        year: i32,
        pages: i32,
        price: f64,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            year,
            pages,
            price,
        }
    }

    /// Copy-on-edit: validate the draft and return a new record with this id.
    pub fn with_fields(&self, draft: &BookDraft) -> Result<Self, ValidationError> {
        Book::new(self.id, draft)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn pages(&self) -> i32 {
        self.pages
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Price ordering. Pair with a stable sort to keep ties in prior order.
    pub fn cmp_by_price(&self, other: &Book) -> Ordering {
        self.price.total_cmp(&other.price)
    }

    /// Merge two records: pages are summed, prices averaged, everything else
    /// comes from `self`. A pure value computation; the store is untouched.
    ///
    /// Records loaded from the file skip range checks, so the page sum
    /// saturates at `i32::MAX` and the average halves each price before adding.
    pub fn combine(&self, other: &Book) -> Book {
        Book {
            pages: self.pages.saturating_add(other.pages),
            price: self.price / 2.0 + other.price / 2.0,
            ..self.clone()
        }
    }

    /// Text blob searched by the query layer.
    pub fn search_key(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.title,
            self.author,
            self.genre,
            self.year,
            self.pages,
            format_price(self.price),
            self.id
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.title, self.author, self.year)
    }
}

#[cfg(test)]
pub(crate) fn draft(
    title: &str,
    author: &str,
    genre: &str,
    year: &str,
    pages: &str,
    price: &str,
) -> BookDraft {
    BookDraft {
        title: title.into(),
        author: author.into(),
        genre: genre.into(),
        year: year.into(),
        pages: pages.into(),
        price: price.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, pages: &str, price: &str) -> Book {
        Book::new(id, &draft("Dune", "Frank Herbert", "Sci-Fi", "1965", pages, price)).unwrap()
    }

    #[test]
    fn new_trims_text_fields() {
        let book = Book::new(
            3,
            &draft("  Emma ", " Jane Austen", "Novel  ", " 1815 ", "474", " 9.5"),
        )
        .unwrap();

        assert_eq!(book.id(), 3);
        assert_eq!(book.title(), "Emma");
        assert_eq!(book.author(), "Jane Austen");
        assert_eq!(book.genre(), "Novel");
        assert_eq!(book.year(), 1815);
        assert_eq!(book.pages(), 474);
        assert_eq!(book.price(), 9.5);
    }

    #[test]
    fn new_reports_every_violation() {
        let err = Book::new(1, &draft("", "  ", "x", "9999", "0", "abc")).unwrap_err();
        let fields: Vec<BookField> = err.violations().iter().map(|v| v.field).collect();

        assert_eq!(
            fields,
            vec![
                BookField::Title,
                BookField::Author,
                BookField::Year,
                BookField::Pages,
                BookField::Price
            ]
        );
        assert_eq!(
            err.violations()[4].kind,
            ViolationKind::NotANumber("abc".into())
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(Book::new(1, &draft("a", "b", "c", "1564", "1", "0")).is_ok());
        assert!(Book::new(1, &draft("a", "b", "c", "2025", "100100", "2385768000")).is_ok());

        let err = Book::new(1, &draft("a", "b", "c", "1563", "100101", "-0.01")).unwrap_err();
        assert!(err.has(BookField::Year));
        assert!(err.has(BookField::Pages));
        assert!(err.has(BookField::Price));
    }

    #[test]
    fn nan_price_is_rejected() {
        let err = Book::new(1, &draft("a", "b", "c", "2000", "10", "NaN")).unwrap_err();
        assert_eq!(
            err.violations()[0].kind,
            ViolationKind::OutOfRange("NaN".into())
        );
    }

    #[test]
    fn with_fields_keeps_id_and_leaves_original_alone() {
        let original = book(42, "100", "10");
        let edited = original
            .with_fields(&draft("Dune Messiah", "Frank Herbert", "Sci-Fi", "1969", "256", "12"))
            .unwrap();

        assert_eq!(edited.id(), 42);
        assert_eq!(edited.title(), "Dune Messiah");
        assert_eq!(original.title(), "Dune");
    }

    #[test]
    fn combine_sums_pages_and_averages_price() {
        let left = book(1, "100", "10");
        let right = Book::new(2, &draft("Other", "Someone", "Poetry", "2000", "50", "20")).unwrap();

        let merged = left.combine(&right);

        assert_eq!(merged.pages(), 150);
        assert_eq!(merged.price(), 15.0);
        assert_eq!(merged.id(), 1);
        assert_eq!(merged.title(), "Dune");
        assert_eq!(merged.author(), "Frank Herbert");
        assert_eq!(merged.genre(), "Sci-Fi");
        assert_eq!(merged.year(), 1965);
    }

    #[test]
    fn combine_saturates_page_sum_of_loaded_records() {
        let left = Book::from_trusted(1, "A", "B", "C", 2000, 2_000_000_000, f64::MAX);
        let right = Book::from_trusted(2, "D", "E", "F", 2000, 2_000_000_000, f64::MAX);

        let merged = left.combine(&right);

        assert_eq!(merged.pages(), i32::MAX);
        assert_eq!(merged.price(), f64::MAX);
        assert_eq!(merged.id(), 1);
    }

    #[test]
    fn combine_saturates_negative_page_sum() {
        let left = Book::from_trusted(1, "A", "B", "C", 2000, i32::MIN, 0.0);
        let right = Book::from_trusted(2, "D", "E", "F", 2000, -1, 0.0);

        assert_eq!(left.combine(&right).pages(), i32::MIN);
    }

    #[test]
    fn unparseable_numbers_report_trimmed_input() {
        let err = Book::new(1, &draft("a", "b", "c", "  abc ", "1", " 2x ")).unwrap_err();
        let kinds: Vec<&ViolationKind> = err.violations().iter().map(|v| &v.kind).collect();

        assert_eq!(
            kinds,
            vec![
                &ViolationKind::NotANumber("abc".into()),
                &ViolationKind::NotANumber("2x".into())
            ]
        );
    }

    #[test]
    fn price_ordering() {
        let cheap = book(1, "10", "3");
        let pricey = book(2, "10", "5");

        assert_eq!(cheap.cmp_by_price(&pricey), Ordering::Less);
        assert_eq!(pricey.cmp_by_price(&cheap), Ordering::Greater);
        assert_eq!(cheap.cmp_by_price(&book(3, "99", "3")), Ordering::Equal);
    }

    #[test]
    fn search_key_concatenates_fields() {
        assert_eq!(
            book(7, "412", "499.9").search_key(),
            "Dune Frank Herbert Sci-Fi 1965 412 499.9 7"
        );
    }

    #[test]
    fn draft_from_book_round_trips_through_new() {
        let original = book(5, "412", "15");
        let draft = BookDraft::from_book(&original);

        assert_eq!(draft.price, "15.0");
        assert_eq!(original.with_fields(&draft).unwrap(), original);
    }

    #[test]
    fn format_price_keeps_a_fractional_digit() {
        assert_eq!(format_price(15.0), "15.0");
        assert_eq!(format_price(499.9), "499.9");
        assert_eq!(format_price(2_385_768_000.0), "2385768000.0");
    }
}
