//! Persistence for the catalog: the delimited text format, the store that
//! owns the collection, where the file lives, and first-run seeding.

pub mod codec;
mod location;
mod seed;
mod store;

pub use codec::{
    decode, decode_bytes_with_report, decode_with_report, encode, encode_to, DecodeReport, HEADER,
    SEPARATOR,
};
pub use location::CatalogConfig;
pub use seed::{load_or_seed, sample_books};
pub use store::Store;
