//! Elasticsearch search index store for denormalized book documents.

pub mod query;
mod store;

pub use query::{SearchFilters, TITLE_AGGREGATION};

use std::fmt::Debug;
use std::time::Duration;

use elasticsearch::Elasticsearch;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Authentication configuration for the search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SearchIndexAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Configuration for the search index store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndexConfig {
    /// Node URL (e.g. `http://localhost:9200`).
    pub node: String,

    /// Index holding book documents (default: `"books"`).
    #[serde(default = "default_index")]
    pub index: String,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<SearchIndexAuth>,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,
}

fn default_index() -> String {
    "books".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            node: "http://localhost:9200".to_string(),
            index: default_index(),
            request_timeout_ms: default_request_timeout_ms(),
            auth: None,
            disable_certificate_validation: false,
        }
    }
}

/// Elasticsearch-backed store for [`crate::model::BookDocument`]s.
pub struct SearchIndexStore {
    client: Elasticsearch,
    config: SearchIndexConfig,
}

impl Debug for SearchIndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndexStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SearchIndexStore {
    /// Creates a new store with the given configuration.
    ///
    /// Building the client does not contact the cluster; connection
    /// failures surface on the first operation.
    pub fn new(config: SearchIndexConfig) -> StorageResult<Self> {
        let client = Self::build_client(&config)?;
        Ok(Self { client, config })
    }

    fn build_client(config: &SearchIndexConfig) -> StorageResult<Elasticsearch> {
        let url: elasticsearch::http::Url =
            config.node.parse().map_err(|e| StorageError::ConnectionFailed {
                backend: "elasticsearch",
                message: format!("Invalid URL: {}", e),
            })?;

        let conn_pool = SingleNodeConnectionPool::new(url);

        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(Duration::from_millis(config.request_timeout_ms));

        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        if let Some(ref auth) = config.auth {
            builder = match auth {
                SearchIndexAuth::Basic { username, password } => {
                    builder.auth(Credentials::Basic(username.clone(), password.clone()))
                }
                SearchIndexAuth::Bearer { token } => {
                    builder.auth(Credentials::Bearer(token.clone()))
                }
            };
        }

        let transport = builder.build().map_err(|e| StorageError::ConnectionFailed {
            backend: "elasticsearch",
            message: format!("Failed to build transport: {}", e),
        })?;

        Ok(Elasticsearch::new(transport))
    }

    pub(crate) fn client(&self) -> &Elasticsearch {
        &self.client
    }

    /// Returns the index this store reads and writes.
    pub fn index_name(&self) -> &str {
        &self.config.index
    }
}
