//! Books catalogue service.
//!
//! Serves the catalogue REST API over a SQLite record store and an
//! Elasticsearch search index.

use clap::Parser;
use tracing::info;

use catalogue_persistence::records::SqliteRecordStore;
use catalogue_persistence::search::{SearchIndexAuth, SearchIndexConfig, SearchIndexStore};
use catalogue_rest::{ServerConfig, create_app_with_config, init_logging};

/// Creates and initializes the record store from the server configuration.
fn create_record_store(config: &ServerConfig) -> anyhow::Result<SqliteRecordStore> {
    let db_path = config.database_url.as_deref().unwrap_or("catalogue.db");
    info!(database = %db_path, "Initializing record store");

    let store = if db_path == ":memory:" {
        SqliteRecordStore::in_memory()?
    } else {
        SqliteRecordStore::open(db_path)?
    };
    store.init_schema()?;

    Ok(store)
}

/// Creates the search index store from the server configuration.
fn create_index_store(config: &ServerConfig) -> anyhow::Result<SearchIndexStore> {
    let auth = match (&config.es_username, &config.es_password) {
        (Some(username), Some(password)) => Some(SearchIndexAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let index_config = SearchIndexConfig {
        node: config.es_node.clone(),
        index: config.es_index.clone(),
        auth,
        ..Default::default()
    };

    info!(node = %index_config.node, index = %index_config.index, "Initializing search index store");
    Ok(SearchIndexStore::new(index_config)?)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        "Starting catalogue server"
    );

    let records = create_record_store(&config)?;
    let index = create_index_store(&config)?;

    let app = create_app_with_config(records, index, config.clone());
    serve(app, &config).await
}
