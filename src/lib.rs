//! Link Tracker: anchor extraction for a list of tracked web pages
//!
//! This crate loads a `name;url` page list, fetches each page, decodes it with the
//! charset announced by the server, and collects every `<a ...>...</a>` fragment
//! found on each line of the document.

pub mod config;
pub mod extractor;
pub mod output;
pub mod registry;
pub mod tracker;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for Link Tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page list error: {0}")]
    Load(#[from] LoadError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Page list errors
///
/// Malformed lines never produce an error; they are skipped by the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read page list {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Why a connection to a page could not be established
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Other(String),
}

/// Diagnostic attached to an extraction that did not read the whole page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: FetchFailure },

    #[error("Unsupported charset '{charset}' for {url}")]
    Decode { url: String, charset: String },

    #[error("Read of {url} interrupted: {message}")]
    Stream { url: String, message: String },
}

impl ExtractError {
    /// The URL the failed extraction was for
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::Decode { url, .. } | Self::Stream { url, .. } => url,
        }
    }

    /// Returns true if some content was read before the failure
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Stream { .. })
    }
}

/// Result type alias for Link Tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extractor::{ExtractionOutcome, LinkExtractor};
pub use registry::{PageRecord, PageRegistry};
pub use tracker::Tracker;

/// Loads the tracked pages listed in a `name;url` file
pub fn load_pages(path: &Path) -> std::result::Result<Vec<PageRecord>, LoadError> {
    registry::load_pages(path)
}

/// Extracts the anchor fragments of a single page using the default configuration
pub async fn extract_links(url: &str) -> Result<ExtractionOutcome> {
    let extractor = LinkExtractor::new(&Config::default().fetcher)?;
    Ok(extractor.extract(url).await)
}
