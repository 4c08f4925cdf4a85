//! Route configuration.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Creates all catalogue REST API routes.
///
/// ## System-level
/// - `GET /health` - Health check
///
/// ## Record store
/// - `GET /books` - List (with optional filters)
/// - `POST /books` - Create
/// - `GET /books/{id}` - Read
/// - `PUT /books/{id}` - Full replace
/// - `PATCH /books/{id}` - RFC 7386 merge patch
/// - `DELETE /books/{id}` - Delete
///
/// ## Search index
/// - `GET /index/books` - Query (with optional facets)
/// - `POST /index/books` - Index a document
/// - `GET /index/books/{id}` - Read
/// - `DELETE /index/books/{id}` - Delete
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler))
        // Record-store routes
        .route("/books", get(handlers::list_books_handler))
        .route("/books", post(handlers::create_book_handler))
        .route("/books/{id}", get(handlers::get_book_handler))
        .route("/books/{id}", put(handlers::replace_book_handler))
        .route("/books/{id}", patch(handlers::patch_book_handler))
        .route("/books/{id}", delete(handlers::delete_book_handler))
        // Search-index routes
        .route("/index/books", get(handlers::query_index_handler))
        .route("/index/books", post(handlers::create_document_handler))
        .route("/index/books/{id}", get(handlers::get_document_handler))
        .route(
            "/index/books/{id}",
            delete(handlers::delete_document_handler),
        )
        // State
        .with_state(state)
}
