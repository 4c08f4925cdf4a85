//! Application state for the catalogue REST API.
//!
//! Holds the two services (record store side and search index side)
//! plus the server configuration, shared across all request handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::{BookIndexService, BookService};

/// Shared application state for the REST API.
pub struct AppState {
    /// Relational book records.
    books: Arc<BookService>,

    /// Denormalized book documents in the search index.
    index: Arc<BookIndexService>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manual Clone: the fields are Arcs, the inner types need not be Clone.
impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
            index: Arc::clone(&self.index),
            config: Arc::clone(&self.config),
        }
    }
}

impl AppState {
    /// Creates a new AppState with the given services and configuration.
    pub fn new(books: BookService, index: BookIndexService, config: ServerConfig) -> Self {
        Self {
            books: Arc::new(books),
            index: Arc::new(index),
            config: Arc::new(config),
        }
    }

    /// Returns the record-store service.
    pub fn books(&self) -> &BookService {
        &self.books
    }

    /// Returns the search-index service.
    pub fn index(&self) -> &BookIndexService {
        &self.index
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
