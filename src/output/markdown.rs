//! Markdown report generation
//!
//! This module renders a processed batch as a markdown document: the summary,
//! the failures, and the links of every page.

use crate::output::summary::BatchSummary;
use crate::registry::PageRegistry;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of the batch to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(std::io::Error)` - Failed to create or write the file
pub fn generate_markdown_report(
    registry: &PageRegistry,
    summary: &BatchSummary,
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = format_markdown_report(registry, summary, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a processed batch as markdown
pub fn format_markdown_report(
    registry: &PageRegistry,
    summary: &BatchSummary,
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str("# Link Tracker Report\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("- **Pages**: {}\n", summary.total_pages));
    md.push_str(&format!("- **Processed**: {}\n", summary.processed_pages));
    md.push_str(&format!("- **Links**: {}\n", summary.total_links));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    if !summary.failures.is_empty() {
        md.push_str("## Failures\n\n");
        md.push_str("| Page | URL | Links Kept | Error |\n");
        md.push_str("|------|-----|------------|-------|\n");
        for failure in &summary.failures {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&failure.name),
                escape_cell(&failure.url),
                failure.links_found,
                escape_cell(&failure.message)
            ));
        }
        md.push('\n');
    }

    md.push_str("## Pages\n\n");
    for page in registry {
        md.push_str(&format!("### {}\n\n", page.name()));
        md.push_str(&format!("<{}>\n\n", page.url()));

        if page.links().is_empty() {
            md.push_str("_No links found._\n\n");
            continue;
        }

        // Fragments are raw HTML, so they go in a fenced block
        md.push_str("```html\n");
        for link in page.links() {
            md.push_str(link);
            md.push('\n');
        }
        md.push_str("```\n\n");
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
