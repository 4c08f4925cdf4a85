//! Domain models for the catalogue.
//!
//! All types serialize with camelCase field names, which is the wire
//! format the service has always exposed (`publishedDate`, `coverImage`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A canonical book record, persisted in the relational store.
///
/// The identifier is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned numeric identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title, non-blank, at most 60 characters.
    pub title: String,
    /// Author, non-blank.
    pub author: String,
    /// Publishing house, optional at the record level.
    pub editorial: Option<String>,
    /// Page count, at least 1.
    pub pages: i32,
    /// Ordered list of genres, non-empty.
    pub genres: Vec<String>,
    /// Publication date, strictly before today.
    pub published_date: NaiveDate,
    /// Rating in the range 1-5.
    pub rating: i32,
    /// Price, non-negative.
    pub price: f64,
    /// Cover image URL.
    pub cover_image: String,
    /// Physical dimensions, free-form.
    pub dimensions: String,
    /// Units in stock, non-negative.
    pub stock: i32,
    /// Whether the book is visible to readers.
    pub visible: bool,
}

/// Request body for creating or fully replacing a book record.
///
/// Every field is optional at the type level; the validation
/// conjunction in the service layer decides whether the request can
/// produce an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub editorial: Option<String>,
    pub pages: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub published_date: Option<NaiveDate>,
    pub rating: Option<i32>,
    pub price: Option<f64>,
    pub cover_image: Option<String>,
    pub dimensions: Option<String>,
    pub stock: Option<i32>,
    pub visible: Option<bool>,
}

/// A denormalized book document, persisted in the search index.
///
/// Differs from [`Book`] where the index mapping differs: genres is a
/// single delimited string and rating is a small integer. The string
/// identifier is assigned by the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDocument {
    /// Index-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub editorial: String,
    pub pages: i32,
    /// Delimited genre string, e.g. `"Drama,Suspenso"`.
    pub genres: String,
    pub published_date: NaiveDate,
    pub rating: i16,
    pub price: f64,
    pub cover_image: String,
    pub dimensions: String,
    pub stock: i32,
    pub visible: bool,
}

/// Request body for creating a book document in the search index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookDocumentRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub editorial: Option<String>,
    pub pages: Option<i32>,
    pub genres: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub rating: Option<i16>,
    pub price: Option<f64>,
    pub cover_image: Option<String>,
    pub dimensions: Option<String>,
    pub stock: Option<i32>,
    pub visible: Option<bool>,
}

/// One term-aggregation bucket, enriched with a refinement link.
///
/// Derived per query and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetBucket {
    /// The distinct field value this bucket counts.
    pub key: String,
    /// Number of visible documents holding the value.
    pub count: i64,
    /// Ready-to-follow search URL narrowing to this bucket.
    pub url: String,
}

/// Response for a search index query: matching documents plus facets.
///
/// `aggs` is always present; it is empty unless aggregation was
/// requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookSearchResponse {
    pub books: Vec<BookDocument>,
    pub aggs: Vec<FacetBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_wire_format_is_camel_case() {
        let book = Book {
            id: Some(7),
            title: "Clean Code".to_string(),
            author: "Robert Martin".to_string(),
            editorial: Some("Prentice Hall".to_string()),
            pages: 464,
            genres: vec!["Tech".to_string()],
            published_date: NaiveDate::from_ymd_opt(2008, 8, 1).unwrap(),
            rating: 5,
            price: 40.0,
            cover_image: "http://covers.example.com/clean-code.png".to_string(),
            dimensions: "20x15".to_string(),
            stock: 10,
            visible: true,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["publishedDate"], json!("2008-08-01"));
        assert_eq!(value["coverImage"], json!("http://covers.example.com/clean-code.png"));
        assert!(value.get("published_date").is_none());
    }

    #[test]
    fn test_create_request_tolerates_missing_fields() {
        let request: CreateBookRequest =
            serde_json::from_value(json!({ "title": "A" })).unwrap();
        assert_eq!(request.title.as_deref(), Some("A"));
        assert!(request.author.is_none());
        assert!(request.visible.is_none());
    }

    #[test]
    fn test_document_id_skipped_when_unassigned() {
        let doc = BookDocument {
            id: None,
            title: "T".to_string(),
            author: "A".to_string(),
            editorial: "E".to_string(),
            pages: 1,
            genres: "Drama".to_string(),
            published_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            rating: 3,
            price: 9.5,
            cover_image: "http://example.com/c.png".to_string(),
            dimensions: "20x15".to_string(),
            stock: 0,
            visible: true,
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("id").is_none());
    }
}
