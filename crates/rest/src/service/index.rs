//! Service for the search-index book documents.

use catalogue_persistence::StorageResult;
use catalogue_persistence::model::{BookDocument, BookSearchResponse, CreateBookDocumentRequest};
use catalogue_persistence::search::{SearchFilters, SearchIndexStore};

/// Business logic over the search index store.
///
/// Same sentinel convention as the record-store service: invalid
/// requests and unknown identifiers are `Ok(None)` / `Ok(false)`.
#[derive(Debug)]
pub struct BookIndexService {
    store: SearchIndexStore,
}

impl BookIndexService {
    /// Creates a service over the given index store.
    pub fn new(store: SearchIndexStore) -> Self {
        Self { store }
    }

    /// Runs the filter query, enriching facet buckets with links rooted
    /// at `base_url`.
    pub async fn query(
        &self,
        filters: &SearchFilters,
        base_url: &str,
    ) -> StorageResult<BookSearchResponse> {
        self.store.search(filters, base_url).await
    }

    /// Fetches a document by identifier.
    pub async fn get(&self, id: &str) -> StorageResult<Option<BookDocument>> {
        self.store.get(id).await
    }

    /// Validates and indexes a document.
    ///
    /// Returns `Ok(None)` when the request fails validation.
    pub async fn create(
        &self,
        request: &CreateBookDocumentRequest,
    ) -> StorageResult<Option<BookDocument>> {
        match assemble(request) {
            Some(document) => self.store.save(&document).await.map(Some),
            None => Ok(None),
        }
    }

    /// Deletes a document; reports whether it existed.
    pub async fn remove(&self, id: &str) -> StorageResult<bool> {
        if self.store.get(id).await?.is_none() {
            return Ok(false);
        }
        self.store.delete(id).await
    }
}

fn non_blank(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|s| !s.trim().is_empty())
}

/// Validates the request and assembles the document.
///
/// Mirrors the record validation, with the index-mapping differences:
/// genres is a non-blank delimited string and the cover image is not
/// required to parse as a URL.
fn assemble(request: &CreateBookDocumentRequest) -> Option<BookDocument> {
    let title = non_blank(&request.title)?;
    let author = non_blank(&request.author)?;
    let editorial = non_blank(&request.editorial)?;
    let cover_image = non_blank(&request.cover_image)?;
    let dimensions = non_blank(&request.dimensions)?;
    let genres = non_blank(&request.genres)?;

    let pages = request.pages.filter(|&p| p > 0)?;
    let published_date = request
        .published_date
        .filter(|d| *d < chrono::Utc::now().date_naive())?;
    let rating = request.rating.filter(|r| (0..6).contains(r))?;
    let price = request.price.filter(|&p| p > 0.0)?;
    let stock = request.stock.filter(|&s| s >= 0)?;
    let visible = request.visible?;

    Some(BookDocument {
        id: None,
        title: title.clone(),
        author: author.clone(),
        editorial: editorial.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_request() -> CreateBookDocumentRequest {
        CreateBookDocumentRequest {
            title: Some("Clean Code".to_string()),
            author: Some("Robert Martin".to_string()),
            editorial: Some("Prentice Hall".to_string()),
            pages: Some(464),
            genres: Some("Tech,Software".to_string()),
            published_date: Some(NaiveDate::from_ymd_opt(2008, 8, 1).unwrap()),
            rating: Some(5),
            price: Some(40.0),
            cover_image: Some("http://covers.example.com/clean-code.png".to_string()),
            dimensions: Some("20x15".to_string()),
            stock: Some(10),
            visible: Some(true),
        }
    }

    #[test]
    fn test_assemble_valid_request() {
        let document = assemble(&valid_request()).expect("assembled");
        assert!(document.id.is_none());
        assert_eq!(document.genres, "Tech,Software");
        assert_eq!(document.rating, 5);
    }

    #[test]
    fn test_assemble_rejects_blank_genres() {
        let request = CreateBookDocumentRequest {
            genres: Some("  ".to_string()),
            ..valid_request()
        };
        assert!(assemble(&request).is_none());
    }

    #[test]
    fn test_assemble_rejects_out_of_range_rating() {
        let request = CreateBookDocumentRequest {
            rating: Some(6),
            ..valid_request()
        };
        assert!(assemble(&request).is_none());
    }

    #[test]
    fn test_assemble_does_not_require_url_cover_image() {
        let request = CreateBookDocumentRequest {
            cover_image: Some("portada.png".to_string()),
            ..valid_request()
        };
        assert!(assemble(&request).is_some());
    }

    #[test]
    fn test_assemble_rejects_future_date() {
        let request = CreateBookDocumentRequest {
            published_date: Some(chrono::Utc::now().date_naive()),
            ..valid_request()
        };
        assert!(assemble(&request).is_none());
    }
}
