//! Book metadata lookup against the Google Books API.
//!
//! A lookup turns a loosely-structured file name into a `BookInfo`, parses
//! series/index/year out of it, searches Google Books, picks the candidate
//! whose normalized title and year match, and maps the volume into a
//! `MetadataResult`.

pub mod book;
pub mod config;
pub mod error;
pub mod lookup;
pub mod mapping;
pub mod matcher;
pub mod normalize;
pub mod parse;
pub mod query;

pub use tokio_util::sync::CancellationToken;

pub mod prelude {
    pub use crate::book::*;
    pub use crate::error::*;
    pub use crate::lookup::{GoogleBooksProvider, MetadataProvider};
    pub use tokio_util::sync::CancellationToken;
}
