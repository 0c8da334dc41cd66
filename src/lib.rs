//! PubSweep: a polite PubMed literature scraper
//!
//! This crate walks PubMed search results for a keyword/year-range query,
//! follows each result to its detail page, and extracts a fixed set of
//! bibliographic fields into normalized records. Fetching is strictly
//! sequential and throttled, and every request is checked against a URL
//! allowlist before any network I/O happens.

pub mod config;
pub mod crawler;
pub mod output;
pub mod query;
pub mod url;

use thiserror::Error;

/// Main error type for PubSweep operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("refusing to fetch {url}: not under an allowed URL prefix")]
    PolicyViolation { url: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("selector {selector:?} failed to compile: {message}")]
    Selector { selector: String, message: String },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("failed to parse URL {url:?}: {message}")]
    Parse { url: String, message: String },

    #[error("URL {0:?} has no host to resolve against")]
    MissingHost(String),
}

/// Result type alias for PubSweep operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::record::{Field, FieldValue, Record};
pub use crawler::Coordinator;
pub use query::SearchQuery;
pub use self::url::resolve;
