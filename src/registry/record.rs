//! Tracked page definition
use serde::Serialize;
use std::fmt;

/// A tracked page and the anchor fragments extracted from it
///
/// `links` is empty until an extraction runs, and each extraction replaces it
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    name: String,
    url: String,
    links: Vec<String>,
}

impl PageRecord {
    /// Creates a record with no links
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            links: Vec::new(),
        }
    }

    /// User-facing label of the page
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch target, not validated until it is fetched
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fragments found by the last extraction, in document order
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Replaces the links with the result of a new extraction
    pub fn set_links(&mut self, links: Vec<String>) {
        self.links = links;
    }
}

impl fmt::Display for PageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}
