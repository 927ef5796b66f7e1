//! Batch coordinator - runs the extractor over every tracked page
//!
//! Pages are fetched one after another by default. With a concurrency limit above
//! one, each page gets its own task that owns only a copy of the URL; the links
//! are attached back to the registry by the coordinating task once all tasks are
//! done, so no record is ever touched by two tasks.

use crate::config::Config;
use crate::extractor::{ExtractionOutcome, LinkExtractor};
use crate::output::BatchSummary;
use crate::registry::PageRegistry;
use crate::{ExtractError, FetchFailure, TrackerError};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Runs link extraction over a page registry
#[derive(Debug, Clone)]
pub struct Tracker {
    extractor: Arc<LinkExtractor>,
    max_concurrent: usize,
}

impl Tracker {
    /// Creates a tracker from the full configuration
    pub fn new(config: &Config) -> Result<Self, TrackerError> {
        let extractor = LinkExtractor::new(&config.fetcher)?;
        Ok(Self::with_extractor(
            extractor,
            config.tracker.max_concurrent_fetches,
        ))
    }

    /// Creates a tracker around an existing extractor
    pub fn with_extractor(extractor: LinkExtractor, max_concurrent: usize) -> Self {
        Self {
            extractor: Arc::new(extractor),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Extracts the links of every page and attaches them to their records
    ///
    /// Each record's links are replaced by the new result, partial or not.
    /// Failures are collected in the returned summary; they never stop the batch.
    pub async fn process(&self, registry: &mut PageRegistry) -> BatchSummary {
        tracing::info!(
            "Processing {} page(s), {} at a time",
            registry.len(),
            self.max_concurrent
        );

        let outcomes = if self.max_concurrent == 1 {
            self.extract_sequential(registry).await
        } else {
            self.extract_concurrent(registry).await
        };

        let mut summary = BatchSummary::new(registry.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            if let Some(page) = registry.get(index) {
                summary.record(page, &outcome);
                tracing::info!("Processed {}: {} link(s)", page, outcome.links.len());
            }
            registry.set_links(index, outcome.links);
        }

        tracing::info!(
            "Batch complete: {} link(s) across {} page(s), {} failure(s)",
            summary.total_links,
            summary.processed_pages,
            summary.failed_pages()
        );
        summary
    }

    async fn extract_sequential(&self, registry: &PageRegistry) -> Vec<ExtractionOutcome> {
        let mut outcomes = Vec::with_capacity(registry.len());
        for page in registry {
            outcomes.push(self.extractor.extract(page.url()).await);
        }
        outcomes
    }

    async fn extract_concurrent(&self, registry: &PageRegistry) -> Vec<ExtractionOutcome> {
        let urls: Vec<String> = registry.iter().map(|page| page.url().to_string()).collect();
        let mut results: Vec<Option<ExtractionOutcome>> = vec![None; urls.len()];
        let mut pending = urls.iter().cloned().enumerate();
        let mut tasks = JoinSet::new();

        loop {
            while tasks.len() < self.max_concurrent {
                let Some((index, url)) = pending.next() else {
                    break;
                };
                let extractor = Arc::clone(&self.extractor);
                tasks.spawn(async move {
                    let outcome = extractor.extract(&url).await;
                    (index, outcome)
                });
            }

            match tasks.join_next().await {
                Some(Ok((index, outcome))) => results[index] = Some(outcome),
                Some(Err(e)) => tracing::error!("Extraction task failed: {}", e),
                None => break,
            }
        }

        results
            .into_iter()
            .zip(urls)
            .map(|(outcome, url)| {
                outcome.unwrap_or_else(|| {
                    ExtractionOutcome::failed(ExtractError::Fetch {
                        url,
                        reason: FetchFailure::Other("extraction task aborted".to_string()),
                    })
                })
            })
            .collect()
    }
}

/// Processes an already loaded registry with the given configuration
///
/// # Returns
///
/// * `Ok(BatchSummary)` - Totals for the batch
/// * `Err(TrackerError)` - The HTTP client could not be built
pub async fn run_batch(
    config: &Config,
    registry: &mut PageRegistry,
) -> Result<BatchSummary, TrackerError> {
    let tracker = Tracker::new(config)?;
    Ok(tracker.process(registry).await)
}
