//! Delimited text format of the catalog file.
//!
//! ```text
//! id;title;author;genre;year;pages;price
//! 1;Example Title;Example Author;Fiction;2001;320;499.9
//! ```
//!
//! The header is always written and always skipped on read without being
//! looked at. Fields are not quoted or escaped, so a value containing `;`
//! corrupts its line. Reading is lenient: any line that does not split into
//! exactly seven parseable fields is dropped instead of failing the load,
//! which means a damaged file quietly loses records. That includes lines that
//! are not valid UTF-8 when reading raw bytes. `decode_with_report` and
//! `decode_bytes_with_report` exist so callers can see which lines went missing.

use std::io::{self, Write};

use crate::models::{format_price, Book};

/// Field separator.
pub const SEPARATOR: char = ';';
/// First line of every catalog file.
pub const HEADER: &str = "id;title;author;genre;year;pages;price";

const FIELD_COUNT: usize = 7;

/// Records recovered from a catalog text plus the lines that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub books: Vec<Book>,
    /// 1-based line numbers (the header is line 1) of every skipped line.
    pub skipped_lines: Vec<usize>,
}

/// Render the whole collection, header first, in collection order.
pub fn encode(books: &[Book]) -> String {
    let mut text = String::with_capacity(HEADER.len() + 1 + books.len() * 64);
    text.push_str(HEADER);
    text.push('\n');
    for book in books {
        text.push_str(&encode_line(book));
        text.push('\n');
    }
    text
}

/// Streaming form of [`encode`].
pub fn encode_to<W: Write>(writer: &mut W, books: &[Book]) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for book in books {
        writeln!(writer, "{}", encode_line(book))?;
    }
    writer.flush()
}

fn encode_line(book: &Book) -> String {
    [
        book.id().to_string(),
        book.title().to_string(),
        book.author().to_string(),
        book.genre().to_string(),
        book.year().to_string(),
        book.pages().to_string(),
        format_price(book.price()),
    ]
    .join(";")
}

/// Parse catalog text, silently dropping malformed lines.
pub fn decode(text: &str) -> Vec<Book> {
    decode_with_report(text).books
}

/// Parse catalog text and report which lines were dropped.
pub fn decode_with_report(text: &str) -> DecodeReport {
    decode_lines(text.lines().map(Some))
}

/// Parse raw catalog file bytes. A line that is not valid UTF-8 is dropped
/// and reported like any other malformed line.
pub fn decode_bytes_with_report(bytes: &[u8]) -> DecodeReport {
    let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    decode_lines(lines.into_iter().map(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        std::str::from_utf8(line).ok()
    }))
}

fn decode_lines<'a>(lines: impl Iterator<Item = Option<&'a str>>) -> DecodeReport {
    let mut report = DecodeReport::default();

    for (index, line) in lines.enumerate().skip(1) {
        match line.and_then(decode_line) {
            Some(book) => report.books.push(book),
            None => report.skipped_lines.push(index + 1),
        }
    }

    report
}

fn decode_line(line: &str) -> Option<Book> {
    let parts: Vec<&str> = line.split(SEPARATOR).collect();
    if parts.len() != FIELD_COUNT {
        return None;
    }

    let id = parts[0].parse::<i64>().ok()?;
    let year = parts[4].parse::<i32>().ok()?;
    let pages = parts[5].parse::<i32>().ok()?;
    let price = parts[6].parse::<f64>().ok()?;

    Some(Book::from_trusted(
        id, parts[1], parts[2], parts[3], year, pages, price,
    ))
}
