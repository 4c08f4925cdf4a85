//! Server configuration for the catalogue REST API.
//!
//! Supports programmatic configuration, command line arguments, and
//! environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CATALOGUE_SERVER_PORT` | 8080 | Server port |
//! | `CATALOGUE_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `CATALOGUE_LOG_LEVEL` | info | Log level |
//! | `CATALOGUE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `CATALOGUE_ENABLE_CORS` | true | Enable CORS |
//! | `CATALOGUE_CORS_ORIGINS` | * | Allowed origins |
//! | `CATALOGUE_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `CATALOGUE_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `CATALOGUE_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `CATALOGUE_DATABASE_URL` | catalogue.db | SQLite database path |
//! | `CATALOGUE_ES_NODE` | http://localhost:9200 | Search index node URL |
//! | `CATALOGUE_ES_INDEX` | books | Search index name |
//! | `CATALOGUE_ES_USERNAME` | | Search index username |
//! | `CATALOGUE_ES_PASSWORD` | | Search index password |

use clap::Parser;

/// Server configuration for the catalogue REST API.
///
/// Can be constructed from environment variables with
/// [`ServerConfig::from_env`], from command line arguments with
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "catalogue-server")]
#[command(about = "Books catalogue REST API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "CATALOGUE_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "CATALOGUE_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CATALOGUE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "CATALOGUE_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "CATALOGUE_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "CATALOGUE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "CATALOGUE_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "CATALOGUE_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in facet refinement links).
    #[arg(long, env = "CATALOGUE_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// SQLite database path (`:memory:` for an in-memory store).
    #[arg(long, env = "CATALOGUE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Search index node URL.
    #[arg(long, env = "CATALOGUE_ES_NODE", default_value = "http://localhost:9200")]
    pub es_node: String,

    /// Search index name.
    #[arg(long, env = "CATALOGUE_ES_INDEX", default_value = "books")]
    pub es_index: String,

    /// Search index username for basic auth.
    #[arg(long, env = "CATALOGUE_ES_USERNAME")]
    pub es_username: Option<String>,

    /// Search index password for basic auth.
    #[arg(long, env = "CATALOGUE_ES_PASSWORD")]
    pub es_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: None,
            es_node: "http://localhost:9200".to_string(),
            es_index: "books".to_string(),
            es_username: None,
            es_password: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Parses environment variables without requiring command line
    /// arguments.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            errors.push(format!("Invalid base URL: {}", self.base_url));
        }

        if url::Url::parse(&self.es_node).is_err() {
            errors.push(format!("Invalid search index node URL: {}", self.es_node));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an in-memory database, ephemeral port 0, and a short
    /// timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: Some(":memory:".to_string()),
            es_node: "http://localhost:9200".to_string(),
            es_index: "books-test".to_string(),
            es_username: None,
            es_password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.es_index, "books");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_invalid_node_url() {
        let config = ServerConfig {
            es_node: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert_eq!(config.database_url.as_deref(), Some(":memory:"));
    }
}
