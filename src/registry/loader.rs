//! Page list loading
//!
//! The page list is plain text with one `name;url` record per line.

use crate::extractor::LineBuffer;
use crate::registry::PageRecord;
use crate::LoadError;
use std::path::Path;

/// Field separator of the page list format
const FIELD_SEPARATOR: char = ';';

/// Reads the page list at `path`
///
/// Lines that are not exactly two non-empty fields are skipped.
///
/// # Returns
///
/// * `Ok(Vec<PageRecord>)` - Records in file order (possibly empty)
/// * `Err(LoadError::SourceUnreadable)` - The file is missing, unreadable or not valid UTF-8
pub fn load_pages(path: &Path) -> Result<Vec<PageRecord>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let pages = parse_page_list(&content);
    tracing::debug!("Loaded {} page(s) from {}", pages.len(), path.display());
    Ok(pages)
}

/// Parses page list text into records, preserving line order
///
/// Lines end at `\n`, `\r` or `\r\n`.
pub fn parse_page_list(content: &str) -> Vec<PageRecord> {
    let mut pages = Vec::new();
    let mut lines = LineBuffer::new();
    lines.push_str(content, |line| pages.extend(parse_line(line)));
    lines.finish(|line| pages.extend(parse_line(line)));
    pages
}

/// Parses a single `name;url` line
fn parse_line(line: &str) -> Option<PageRecord> {
    let mut fields = line.split(FIELD_SEPARATOR);
    let name = fields.next()?.trim();
    let url = fields.next()?.trim();

    if fields.next().is_some() || name.is_empty() || url.is_empty() {
        tracing::trace!("Skipping malformed page line: {:?}", line);
        return None;
    }

    Some(PageRecord::new(name, url))
}
