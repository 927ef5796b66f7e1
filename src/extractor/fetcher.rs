//! HTTP fetcher implementation
//!
//! This module handles the network side of an extraction:
//! - Building the HTTP client with the configured user agent and connect timeout
//! - Opening a page and classifying connection failures
//! - Reading the body chunk by chunk with an idle timeout

use crate::config::FetcherConfig;
use crate::extractor::lines::LinkCollector;
use crate::FetchFailure;
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy. Compressed bodies are
/// decompressed before they reach the decoder.
///
/// # Example
///
/// ```no_run
/// use link_tracker::config::FetcherConfig;
/// use link_tracker::extractor::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and waits for a successful response
///
/// `header_timeout` bounds the wait for the response headers.
///
/// # Returns
///
/// * `Ok(Response)` - A 2xx response whose body has not been read yet
/// * `Err(FetchFailure)` - The URL is invalid, the host unreachable, or the status not 2xx
pub async fn open_page(
    client: &Client,
    url: &str,
    header_timeout: Duration,
) -> Result<Response, FetchFailure> {
    let parsed = Url::parse(url).map_err(|e| FetchFailure::InvalidUrl(format!("{}: {}", url, e)))?;

    let response = tokio::time::timeout(header_timeout, client.get(parsed).send())
        .await
        .map_err(|_| FetchFailure::Timeout)?
        .map_err(|e| classify_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure::HttpStatus(status.as_u16()));
    }

    Ok(response)
}

/// Maps a reqwest error raised before the body was read to a fetch failure
fn classify_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_builder() {
        FetchFailure::InvalidUrl(error.to_string())
    } else if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect(error.to_string())
    } else {
        FetchFailure::Other(error.to_string())
    }
}

/// A body that arrives in chunks
pub trait ChunkSource {
    /// Returns the next chunk, `Ok(None)` at the end of the body
    fn next_chunk(&mut self) -> impl Future<Output = Result<Option<Vec<u8>>, String>> + Send;
}

impl ChunkSource for Response {
    fn next_chunk(&mut self) -> impl Future<Output = Result<Option<Vec<u8>>, String>> + Send {
        async move {
            self.chunk()
                .await
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
                .map_err(|e| e.to_string())
        }
    }
}

/// Feeds every chunk of `source` into `collector`
///
/// # Returns
///
/// * `Ok(())` - The whole body was read
/// * `Err(String)` - A read failed or no chunk arrived within `idle_timeout`
pub async fn read_body<S: ChunkSource>(
    source: &mut S,
    collector: &mut LinkCollector,
    idle_timeout: Duration,
) -> Result<(), String> {
    loop {
        match tokio::time::timeout(idle_timeout, source.next_chunk()).await {
            Ok(Ok(Some(chunk))) => collector.feed(&chunk),
            Ok(Ok(None)) => return Ok(()),
            Ok(Err(message)) => return Err(message),
            Err(_) => {
                return Err(format!(
                    "no data received for {} seconds",
                    idle_timeout.as_secs()
                ))
            }
        }
    }
}
