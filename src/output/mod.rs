//! Output module for batch summaries and reports
//!
//! This module handles:
//! - Folding extraction outcomes into batch totals
//! - Printing the pages and summary to the console
//! - Writing a markdown report

mod markdown;
pub mod summary;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use summary::{print_summary, BatchSummary, PageFailure};

use crate::registry::PageRegistry;

/// Prints every page with its links to stdout
pub fn print_pages(registry: &PageRegistry) {
    for page in registry {
        println!("{} - {} link(s)", page, page.links().len());
        for link in page.links() {
            println!("    {}", link);
        }
    }
    println!();
}
