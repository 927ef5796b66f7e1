//! Page registry
//!
//! This module holds the tracked pages of the current batch.
//!
//! # Components
//!
//! - `PageRecord`: one tracked page with its extracted links
//! - `load_pages`: parses a `name;url` page list file
//! - `PageRegistry`: owns the loaded batch; reloading discards the previous one

mod loader;
mod record;

pub use loader::{load_pages, parse_page_list};
pub use record::PageRecord;

use crate::LoadError;
use std::path::Path;

/// The batch of pages currently being tracked
#[derive(Debug, Default, Clone)]
pub struct PageRegistry {
    pages: Vec<PageRecord>,
}

impl PageRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from already loaded records
    pub fn from_pages(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }

    /// Replaces the current batch with the pages listed in `path`
    ///
    /// On failure the current batch is left untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of pages in the new batch
    /// * `Err(LoadError)` - The file could not be read
    pub fn load(&mut self, path: &Path) -> Result<usize, LoadError> {
        self.pages = load_pages(path)?;
        tracing::info!("Loaded {} page(s) from {}", self.pages.len(), path.display());
        Ok(self.pages.len())
    }

    /// Discards every record
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageRecord> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter()
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Replaces the links of the record at `index`
    ///
    /// Returns false if there is no such record.
    pub fn set_links(&mut self, index: usize, links: Vec<String>) -> bool {
        match self.pages.get_mut(index) {
            Some(page) => {
                page.set_links(links);
                true
            }
            None => false,
        }
    }

    /// Sum of the links currently attached to all records
    pub fn total_links(&self) -> usize {
        self.pages.iter().map(|page| page.links().len()).sum()
    }
}

impl<'a> IntoIterator for &'a PageRegistry {
    type Item = &'a PageRecord;
    type IntoIter = std::slice::Iter<'a, PageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
