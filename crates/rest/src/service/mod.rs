//! Business logic between the HTTP handlers and the stores.
//!
//! The services express validation failures and missing entities as
//! `Ok(None)` / `Ok(false)` sentinels; the handlers decide which status
//! code each sentinel means. Only genuine store faults travel as `Err`.

mod books;
mod index;

pub use books::{BookFilters, BookService};
pub use index::BookIndexService;
