//! Handlers for the search-index book documents.
//!
//! `GET/POST [base]/index/books` and `GET/DELETE [base]/index/books/{id}`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalogue_persistence::model::{BookDocument, BookSearchResponse, CreateBookDocumentRequest};
use catalogue_persistence::search::SearchFilters;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Searches the index, returning documents plus facets.
///
/// `GET /index/books?title=&author=&editorial=&genres=&rating=&price=&aggregate=`
///
/// Always answers `200 OK`; a cold or unreachable index is an empty
/// result.
pub async fn query_index_handler(
    State(state): State<AppState>,
    Query(filters): Query<SearchFilters>,
) -> RestResult<Json<BookSearchResponse>> {
    debug!(?filters, "Processing index query request");
    let response = state.index().query(&filters, state.base_url()).await?;
    Ok(Json(response))
}

/// Reads a single document.
///
/// `GET /index/books/{id}` — `200 OK` or `404 Not Found`.
pub async fn get_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<Json<BookDocument>> {
    debug!(id = %id, "Processing document read request");

    match state.index().get(&id).await? {
        Some(document) => Ok(Json(document)),
        None => Err(RestError::NotFound {
            entity: "book document",
            id,
        }),
    }
}

/// Indexes a document.
///
/// `POST /index/books` — `201 Created`, or `400 Bad Request` when the
/// body fails validation.
pub async fn create_document_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateBookDocumentRequest>,
) -> RestResult<Response> {
    debug!(title = ?request.title, "Processing document create request");

    match state.index().create(&request).await? {
        Some(document) => Ok((StatusCode::CREATED, Json(document)).into_response()),
        None => Err(RestError::BadRequest {
            message: "Book document failed validation".to_string(),
        }),
    }
}

/// Deletes a document.
///
/// `DELETE /index/books/{id}` — `200 OK` or `404 Not Found`.
pub async fn delete_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<StatusCode> {
    debug!(id = %id, "Processing document delete request");

    if state.index().remove(&id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(RestError::NotFound {
            entity: "book document",
            id,
        })
    }
}
