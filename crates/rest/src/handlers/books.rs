//! Handlers for the relational book records.
//!
//! `GET/POST [base]/books` and `GET/PUT/PATCH/DELETE [base]/books/{id}`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalogue_persistence::model::{Book, CreateBookRequest};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::service::BookFilters;
use crate::state::AppState;

fn parse_book_id(raw: &str) -> RestResult<i64> {
    raw.parse().map_err(|_| RestError::BadRequest {
        message: format!("Invalid book id: {}", raw),
    })
}

/// Lists book records, optionally narrowed by query filters.
///
/// `GET /books?title=&author=&editorial=&visible=`
///
/// Always answers `200 OK`; an empty catalogue is an empty list.
pub async fn list_books_handler(
    State(state): State<AppState>,
    Query(filters): Query<BookFilters>,
) -> RestResult<Json<Vec<Book>>> {
    debug!(?filters, "Processing book list request");
    let books = state.books().list(&filters)?;
    Ok(Json(books))
}

/// Reads a single book record.
///
/// `GET /books/{id}` — `200 OK` or `404 Not Found`.
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<Json<Book>> {
    debug!(id = %id, "Processing book read request");
    let id = parse_book_id(&id)?;

    match state.books().get(id)? {
        Some(book) => Ok(Json(book)),
        None => Err(RestError::NotFound {
            entity: "book",
            id: id.to_string(),
        }),
    }
}

/// Creates a book record.
///
/// `POST /books` — `201 Created`, or `400 Bad Request` when the body
/// fails validation.
pub async fn create_book_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> RestResult<Response> {
    debug!(title = ?request.title, "Processing book create request");

    match state.books().create(&request)? {
        Some(book) => Ok((StatusCode::CREATED, Json(book)).into_response()),
        None => Err(RestError::BadRequest {
            message: "Book failed validation".to_string(),
        }),
    }
}

/// Fully replaces a book record.
///
/// `PUT /books/{id}` — `200 OK`, or `404 Not Found` when the record
/// does not exist or the replacement cannot be assembled.
pub async fn replace_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateBookRequest>,
) -> RestResult<Json<Book>> {
    debug!(id = %id, "Processing book replace request");
    let id = parse_book_id(&id)?;

    match state.books().replace(id, &request)? {
        Some(book) => Ok(Json(book)),
        None => Err(RestError::NotFound {
            entity: "book",
            id: id.to_string(),
        }),
    }
}

/// Partially updates a book record (RFC 7386 merge patch).
///
/// `PATCH /books/{id}` — `200 OK`, or `400 Bad Request` when the record
/// does not exist or the patched document is no longer a valid book.
pub async fn patch_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> RestResult<Json<Book>> {
    debug!(id = %id, "Processing book patch request");
    let id = parse_book_id(&id)?;

    match state.books().merge_patch(id, &patch)? {
        Some(book) => Ok(Json(book)),
        None => Err(RestError::BadRequest {
            message: format!("Could not patch book {}", id),
        }),
    }
}

/// Deletes a book record.
///
/// `DELETE /books/{id}` — `200 OK` or `404 Not Found`.
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<StatusCode> {
    debug!(id = %id, "Processing book delete request");
    let id = parse_book_id(&id)?;

    if state.books().remove(id)? {
        Ok(StatusCode::OK)
    } else {
        Err(RestError::NotFound {
            entity: "book",
            id: id.to_string(),
        })
    }
}
