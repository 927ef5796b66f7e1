use crate::extractor::CharsetMatch;
use serde::Deserialize;

/// Main configuration structure for Link Tracker
///
/// Every section is optional; missing keys fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub tracker: TrackerConfig,
    pub output: OutputConfig,
}

/// Page fetching and decoding configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Maximum time to establish a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum time to wait for response headers or the next body chunk (seconds)
    #[serde(rename = "read-timeout-secs")]
    pub read_timeout_secs: u64,

    /// How the `charset=` key of the Content-Type header is matched
    #[serde(rename = "charset-match")]
    pub charset_match: CharsetMatch,

    /// Encoding used when the response does not declare a charset
    #[serde(rename = "default-charset")]
    pub default_charset: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("link-tracker/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            charset_match: CharsetMatch::Strict,
            default_charset: "UTF-8".to_string(),
        }
    }
}

/// Batch processing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Number of pages fetched at the same time (1 = one after another)
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 1,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the markdown report, if one should be written
    #[serde(rename = "report-path")]
    pub report_path: Option<String>,
}
