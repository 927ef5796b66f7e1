//! Link extraction for a single page
//!
//! This module contains the extraction pipeline, including:
//! - Opening the page over HTTP(S)
//! - Resolving the body charset from the Content-Type header
//! - Decoding and splitting the body into lines as it arrives
//! - Scanning each line for `<a ...>...</a>` fragments

mod charset;
mod fetcher;
mod lines;
mod scanner;

pub use charset::{charset_parameter, resolve_charset, BodyCharset, CharsetMatch};
pub use fetcher::{build_http_client, open_page, read_body, ChunkSource};
pub use lines::{LineBuffer, LinkCollector};
pub use scanner::{scan_anchors, AnchorFragments};

use crate::config::FetcherConfig;
use crate::{ConfigError, ExtractError, TrackerError};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Result of one extraction
///
/// `error` is `None` when the whole body was read. When it is set, `links` holds
/// whatever was found before the failure (empty unless the error is a stream failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutcome {
    pub links: Vec<String>,
    pub error: Option<ExtractError>,
}

impl ExtractionOutcome {
    pub fn complete(links: Vec<String>) -> Self {
        Self { links, error: None }
    }

    pub fn failed(error: ExtractError) -> Self {
        Self {
            links: Vec::new(),
            error: Some(error),
        }
    }

    pub fn partial(links: Vec<String>, error: ExtractError) -> Self {
        Self {
            links,
            error: Some(error),
        }
    }

    /// Returns true if the page was read to the end
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Splits the outcome into strict success or failure, dropping partial links
    pub fn into_result(self) -> Result<Vec<String>, ExtractError> {
        match self.error {
            None => Ok(self.links),
            Some(error) => Err(error),
        }
    }
}

/// Fetches pages and extracts their anchor fragments
///
/// The extractor keeps no per-page state, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    client: Client,
    read_timeout: Duration,
    charset_match: CharsetMatch,
    default_charset: BodyCharset,
}

impl LinkExtractor {
    /// Creates an extractor from the fetcher configuration
    ///
    /// # Returns
    ///
    /// * `Ok(LinkExtractor)` - Ready to extract
    /// * `Err(TrackerError)` - The HTTP client could not be built or the default charset is unknown
    pub fn new(config: &FetcherConfig) -> Result<Self, TrackerError> {
        let default_charset = BodyCharset::for_label(&config.default_charset).ok_or_else(|| {
            ConfigError::Validation(format!(
                "default_charset '{}' is not a known encoding",
                config.default_charset
            ))
        })?;

        Ok(Self {
            client: build_http_client(config)?,
            read_timeout: Duration::from_secs(config.read_timeout_secs),
            charset_match: config.charset_match,
            default_charset,
        })
    }

    /// Extracts every anchor fragment of the page at `url`, in document order
    ///
    /// Failures never abort the caller: they come back in
    /// [`ExtractionOutcome::error`] together with any fragments found before them.
    /// The connection is released when this returns, whatever the outcome.
    pub async fn extract(&self, url: &str) -> ExtractionOutcome {
        tracing::debug!("Extracting links from {}", url);

        let outcome = self.run(url).await;
        match &outcome.error {
            None => tracing::debug!("Found {} link(s) on {}", outcome.links.len(), url),
            Some(error) if error.is_partial() => tracing::warn!(
                "{} ({} link(s) found before the failure)",
                error,
                outcome.links.len()
            ),
            Some(error) => tracing::warn!("{}", error),
        }
        outcome
    }

    async fn run(&self, url: &str) -> ExtractionOutcome {
        let mut response = match open_page(&self.client, url, self.read_timeout).await {
            Ok(response) => response,
            Err(reason) => {
                return ExtractionOutcome::failed(ExtractError::Fetch {
                    url: url.to_string(),
                    reason,
                })
            }
        };

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let charset = match resolve_charset(
            content_type.as_deref(),
            self.charset_match,
            self.default_charset,
        ) {
            Ok(charset) => charset,
            Err(charset) => {
                return ExtractionOutcome::failed(ExtractError::Decode {
                    url: url.to_string(),
                    charset,
                })
            }
        };
        tracing::debug!("Decoding {} as {}", url, charset.name());

        let mut collector = LinkCollector::new(charset);
        match read_body(&mut response, &mut collector, self.read_timeout).await {
            Ok(()) => ExtractionOutcome::complete(collector.finish()),
            Err(message) => ExtractionOutcome::partial(
                collector.into_links(),
                ExtractError::Stream {
                    url: url.to_string(),
                    message,
                },
            ),
        }
    }
}
