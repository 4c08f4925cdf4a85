//! # catalogue-persistence - Storage layer for the books catalogue
//!
//! This crate provides the two storage components of the catalogue
//! service:
//!
//! - [`records`] - the canonical record store, a SQLite table of books
//!   keyed by a numeric identifier with predicate-based search.
//! - [`search`] - the search index store, an Elasticsearch index of
//!   denormalized book documents keyed by a string identifier, with
//!   full-text queries and bucketed term aggregation.
//!
//! The two stores diverge on purpose (list vs. delimited-string genres,
//! numeric vs. string identifiers) and are deliberately kept as separate
//! concrete components rather than behind a shared storage trait.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalogue_persistence::records::SqliteRecordStore;
//!
//! let store = SqliteRecordStore::in_memory()?;
//! store.init_schema()?;
//! ```

pub mod error;
pub mod model;
pub mod records;
pub mod search;

pub use error::{StorageError, StorageResult};
