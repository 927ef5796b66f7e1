//! Tracker module for processing a batch of pages
//!
//! The page list is loaded by the registry; this module runs the extractor over
//! every record, attaches the links and folds the outcomes into a summary.

mod coordinator;

pub use coordinator::{run_batch, Tracker};

use crate::config::Config;
use crate::output::BatchSummary;
use crate::registry::PageRegistry;
use crate::TrackerError;
use std::path::Path;

/// Loads a page list and processes every page in it
///
/// This is the main entry point for a one-shot run. It will:
/// 1. Load the page list, replacing any previous batch in `registry`
/// 2. Extract the links of each page
/// 3. Attach the links to their records
///
/// # Returns
///
/// * `Ok(BatchSummary)` - Totals for the batch, failures included
/// * `Err(TrackerError)` - The page list could not be read or the HTTP client built
pub async fn track(
    config: &Config,
    pages_path: &Path,
    registry: &mut PageRegistry,
) -> Result<BatchSummary, TrackerError> {
    registry.load(pages_path)?;
    run_batch(config, registry).await
}
