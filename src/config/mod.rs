//! Configuration module for Link Tracker
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing configuration file is not an error: callers fall back to
//! [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use link_tracker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tracker.toml")).unwrap();
//! println!("Read timeout: {}s", config.fetcher.read_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, TrackerConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
