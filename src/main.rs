//! Link Tracker main entry point
//!
//! This is the command-line interface for the Link Tracker.

use clap::Parser;
use link_tracker::config::{load_config_or_default, Config};
use link_tracker::output::{generate_markdown_report, print_pages, print_summary, BatchSummary};
use link_tracker::registry::{PageRecord, PageRegistry};
use link_tracker::tracker::run_batch;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link Tracker: extract the anchors of a list of web pages
///
/// Reads a page list with one `name;url` record per line, fetches every page and
/// lists the `<a>...</a>` fragments found in its HTML source.
#[derive(Parser, Debug)]
#[command(name = "link-tracker")]
#[command(version)]
#[command(about = "Extracts the anchors of a list of web pages", long_about = None)]
struct Cli {
    /// Page list file with one `name;url` record per line
    #[arg(value_name = "PAGES")]
    pages: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load and list the pages without fetching them
    #[arg(long, conflicts_with_all = ["json", "report"])]
    dry_run: bool,

    /// Print the processed pages and summary as JSON
    #[arg(long)]
    json: bool,

    /// Write a markdown report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

/// JSON document printed by `--json`
#[derive(Serialize)]
struct JsonReport<'a> {
    pages: &'a [PageRecord],
    summary: &'a BatchSummary,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let mut registry = PageRegistry::new();
    if let Err(e) = registry.load(&cli.pages) {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&registry);
        return Ok(());
    }

    let summary = run_batch(&config, &mut registry).await?;

    if cli.json {
        let report = JsonReport {
            pages: registry.pages(),
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        print_pages(&registry);
        print_summary(&summary);
    }

    if let Some(path) = report_path(&cli, &config) {
        generate_markdown_report(&registry, &summary, &path)?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_tracker=info,warn"),
            1 => EnvFilter::new("link_tracker=debug,info"),
            2 => EnvFilter::new("link_tracker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: lists the loaded pages
fn handle_dry_run(registry: &PageRegistry) {
    println!("=== Link Tracker Dry Run ===\n");
    println!("Pages ({}):", registry.len());
    for page in registry {
        println!("  - {}", page);
    }
    println!("\n✓ Would fetch {} page(s)", registry.len());
}

/// The command-line report path wins over the configured one
fn report_path(cli: &Cli, config: &Config) -> Option<PathBuf> {
    cli.report
        .clone()
        .or_else(|| config.output.report_path.as_deref().map(PathBuf::from))
}
