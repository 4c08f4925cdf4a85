//! Service for the relational book records.

use catalogue_persistence::StorageResult;
use catalogue_persistence::model::{Book, CreateBookRequest};
use catalogue_persistence::records::SqliteRecordStore;
use serde::Deserialize;
use tracing::error;
use url::Url;

/// Query filters for listing book records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilters {
    /// Title substring filter.
    pub title: Option<String>,
    /// Exact author filter.
    pub author: Option<String>,
    /// Editorial substring filter.
    pub editorial: Option<String>,
    /// Visibility filter.
    pub visible: Option<bool>,
}

impl BookFilters {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.editorial.is_none()
            && self.visible.is_none()
    }
}

/// Business logic over the SQLite record store.
///
/// Invalid requests and unknown identifiers come back as `Ok(None)` /
/// `Ok(false)`; the handlers translate those into 400 or 404.
#[derive(Debug)]
pub struct BookService {
    store: SqliteRecordStore,
}

impl BookService {
    /// Creates a service over the given record store.
    pub fn new(store: SqliteRecordStore) -> Self {
        Self { store }
    }

    /// Lists records, narrowing with predicate search when any filter
    /// is present.
    pub fn list(&self, filters: &BookFilters) -> StorageResult<Vec<Book>> {
        if filters.is_empty() {
            self.store.list()
        } else {
            self.store.search(
                filters.title.as_deref(),
                filters.author.as_deref(),
                filters.editorial.as_deref(),
                filters.visible,
            )
        }
    }

    /// Fetches a record by identifier.
    pub fn get(&self, id: i64) -> StorageResult<Option<Book>> {
        self.store.get(id)
    }

    /// Validates and creates a record.
    ///
    /// Returns `Ok(None)` when the request fails validation.
    pub fn create(&self, request: &CreateBookRequest) -> StorageResult<Option<Book>> {
        match assemble(request) {
            Some(book) => self.store.insert(&book).map(Some),
            None => Ok(None),
        }
    }

    /// Replaces every field of an existing record.
    ///
    /// The replacement is not re-validated; it only has to be complete
    /// enough to form a record. Returns `Ok(None)` when the record does
    /// not exist or a required field is missing.
    pub fn replace(&self, id: i64, request: &CreateBookRequest) -> StorageResult<Option<Book>> {
        if self.store.get(id)?.is_none() {
            return Ok(None);
        }

        let mut replacement = match complete(request) {
            Some(book) => book,
            None => return Ok(None),
        };
        replacement.id = Some(id);

        self.store.update(id, &replacement)?;
        Ok(Some(replacement))
    }

    /// Applies an RFC 7386 merge patch to an existing record.
    ///
    /// Returns `Ok(None)` when the record does not exist or the patched
    /// document no longer deserializes as a book; nothing is persisted
    /// in either case.
    pub fn merge_patch(&self, id: i64, patch: &serde_json::Value) -> StorageResult<Option<Book>> {
        let book = match self.store.get(id)? {
            Some(book) => book,
            None => return Ok(None),
        };

        let mut document =
            serde_json::to_value(&book).map_err(|e| catalogue_persistence::StorageError::Serialization {
                message: format!("Failed to serialize book: {}", e),
            })?;
        json_patch::merge(&mut document, patch);

        let mut patched: Book = match serde_json::from_value(document) {
            Ok(patched) => patched,
            Err(e) => {
                error!("Error patching book {}: {}", id, e);
                return Ok(None);
            }
        };

        // The identifier is not patchable.
        patched.id = Some(id);

        self.store.update(id, &patched)?;
        Ok(Some(patched))
    }

    /// Deletes a record; reports whether it existed.
    pub fn remove(&self, id: i64) -> StorageResult<bool> {
        if self.store.get(id)?.is_none() {
            return Ok(false);
        }
        self.store.delete(id)
    }

    /// Answers whether the record store is reachable.
    pub fn ping(&self) -> StorageResult<()> {
        self.store.ping()
    }
}

fn non_blank(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|s| !s.trim().is_empty())
}

/// Builds the record from the request without applying validation
/// rules. Every field except editorial must be present.
fn complete(request: &CreateBookRequest) -> Option<Book> {
    Some(Book {
        id: None,
        title: request.title.clone()?,
        author: request.author.clone()?,
        editorial: request.editorial.clone(),
        pages: request.pages?,
        genres: request.genres.clone()?,
        published_date: request.published_date?,
        rating: request.rating?,
        price: request.price?,
        cover_image: request.cover_image.clone()?,
        dimensions: request.dimensions.clone()?,
        stock: request.stock?,
        visible: request.visible?,
    })
}

/// Validates the request and assembles the record.
///
/// All rules must hold at once: non-blank title, author, editorial,
/// cover image and dimensions; positive pages and price; at least one
/// genre; publication date strictly before today; rating in `[0, 6)`;
/// non-negative stock; an explicit visible flag. The cover image must
/// additionally parse as a URL.
fn assemble(request: &CreateBookRequest) -> Option<Book> {
    let title = non_blank(&request.title)?;
    let author = non_blank(&request.author)?;
    let editorial = non_blank(&request.editorial)?;
    let cover_image = non_blank(&request.cover_image)?;
    let dimensions = non_blank(&request.dimensions)?;

    let pages = request.pages.filter(|&p| p > 0)?;
    let genres = request.genres.as_ref().filter(|g| !g.is_empty())?;
    let published_date = request
        .published_date
        .filter(|d| *d < chrono::Utc::now().date_naive())?;
    let rating = request.rating.filter(|r| (0..6).contains(r))?;
    let price = request.price.filter(|&p| p > 0.0)?;
    let stock = request.stock.filter(|&s| s >= 0)?;
    let visible = request.visible?;

    Url::parse(cover_image).ok()?;

    Some(Book {
        id: None,
        title: title.clone(),
        author: author.clone(),
        editorial: Some(editorial.clone()),
        pages,
        genres: genres.clone(),
        published_date,
        rating,
        price,
        cover_image: cover_image.clone(),
        dimensions: dimensions.clone(),
        stock,
        visible,
    })
}
