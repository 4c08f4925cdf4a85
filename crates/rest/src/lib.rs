//! # catalogue-rest - Books Catalogue REST API
//!
//! REST API layer for the books catalogue service. Exposes CRUD over
//! the relational record store and query/CRUD over the search index,
//! sharing one wire model.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalogue_persistence::records::SqliteRecordStore;
//! use catalogue_persistence::search::{SearchIndexConfig, SearchIndexStore};
//! use catalogue_rest::{ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let records = SqliteRecordStore::open("catalogue.db")?;
//!     records.init_schema()?;
//!     let index = SearchIndexStore::new(SearchIndexConfig::default())?;
//!
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(records, index, config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list records | GET | `/books` |
//! | create record | POST | `/books` |
//! | read record | GET | `/books/{id}` |
//! | replace record | PUT | `/books/{id}` |
//! | merge patch | PATCH | `/books/{id}` |
//! | delete record | DELETE | `/books/{id}` |
//! | query index | GET | `/index/books` |
//! | index document | POST | `/index/books` |
//! | read document | GET | `/index/books/{id}` |
//! | delete document | DELETE | `/index/books/{id}` |
//! | health | GET | `/health` |
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and JSON error responses
//! - [`state`] - Application state (services, configuration)
//! - [`service`] - Validation and sentinel semantics over the stores
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use catalogue_persistence::records::SqliteRecordStore;
use catalogue_persistence::search::SearchIndexStore;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::service::{BookIndexService, BookService};

/// Creates the Axum application with default configuration.
pub fn create_app(records: SqliteRecordStore, index: SearchIndexStore) -> Router {
    create_app_with_config(records, index, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Wires both stores into the shared state, registers every route, and
/// applies the middleware stack (tracing, timeout, optional CORS).
pub fn create_app_with_config(
    records: SqliteRecordStore,
    index: SearchIndexStore,
    config: ServerConfig,
) -> Router {
    info!("Creating catalogue REST API");

    let state = AppState::new(
        BookService::new(records),
        BookIndexService::new(index),
        config.clone(),
    );

    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            config.request_timeout,
        )));

    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// Call once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("catalogue_rest={},tower_http=debug", level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
