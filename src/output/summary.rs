//! Batch summary built from extraction outcomes
//!
//! Totals are folded from the outcome of each page rather than kept in shared
//! counters, so a summary can be assembled from any number of concurrent
//! extractions.

use crate::extractor::ExtractionOutcome;
use crate::registry::PageRecord;
use serde::Serialize;

/// A page whose extraction reported a failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    pub name: String,
    pub url: String,
    pub message: String,
    /// Links kept from before the failure
    pub links_found: usize,
}

/// Totals for one processed batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Pages in the batch
    pub total_pages: usize,

    /// Pages an extraction was run for
    pub processed_pages: usize,

    /// Links attached across all pages, partial results included
    pub total_links: usize,

    /// Pages whose extraction reported an error
    pub failures: Vec<PageFailure>,
}

impl BatchSummary {
    pub fn new(total_pages: usize) -> Self {
        Self {
            total_pages,
            ..Self::default()
        }
    }

    /// Folds the outcome of one page into the totals
    pub fn record(&mut self, page: &PageRecord, outcome: &ExtractionOutcome) {
        self.processed_pages += 1;
        self.total_links += outcome.links.len();

        if let Some(error) = &outcome.error {
            self.failures.push(PageFailure {
                name: page.name().to_string(),
                url: page.url().to_string(),
                message: error.to_string(),
                links_found: outcome.links.len(),
            });
        }
    }

    pub fn failed_pages(&self) -> usize {
        self.failures.len()
    }

    /// Percentage of processed pages read to the end
    pub fn success_rate(&self) -> f64 {
        if self.processed_pages == 0 {
            return 0.0;
        }
        let succeeded = self.processed_pages - self.failed_pages();
        (succeeded as f64 / self.processed_pages as f64) * 100.0
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &BatchSummary) {
    println!("=== Link Summary ===\n");
    println!("  Pages loaded: {}", summary.total_pages);
    println!("  Pages processed: {}", summary.processed_pages);
    println!("  Links found: {}", summary.total_links);
    println!(
        "  Success rate: {:.1}% ({} failed)",
        summary.success_rate(),
        summary.failed_pages()
    );

    if !summary.failures.is_empty() {
        println!("\nFailures:");
        for failure in &summary.failures {
            println!("  - {} ({}): {}", failure.name, failure.url, failure.message);
        }
    }
}
