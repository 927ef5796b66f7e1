//! Anchor fragment scanning
//!
//! This is a literal substring scan, not an HTML parser: `<A`, quoted `</a>`
//! inside attributes and anchors spanning several lines are not recognised.

const ANCHOR_OPEN: &str = "<a";
const ANCHOR_CLOSE: &str = "</a>";

/// Iterator over the `<a ...>...</a>` fragments of a single line
#[derive(Debug, Clone)]
pub struct AnchorFragments<'a> {
    line: &'a str,
    cursor: usize,
}

/// Scans one line for anchor fragments, left to right
///
/// Each fragment runs from `<a` through the next `</a>` inclusive. Scanning stops
/// at the first `<a` that has no closing tag on the same line.
///
/// # Example
///
/// ```
/// use link_tracker::extractor::scan_anchors;
///
/// let line = r#"foo <a href="x">text</a> bar <a href="y">more"#;
/// let fragments: Vec<&str> = scan_anchors(line).collect();
/// assert_eq!(fragments, vec![r#"<a href="x">text</a>"#]);
/// ```
pub fn scan_anchors(line: &str) -> AnchorFragments<'_> {
    AnchorFragments { line, cursor: 0 }
}

impl<'a> AnchorFragments<'a> {
    fn find_next(&mut self) -> Option<&'a str> {
        let begin = self.cursor + self.line[self.cursor..].find(ANCHOR_OPEN)?;
        let after_open = begin + ANCHOR_OPEN.len();
        let end = after_open + self.line[after_open..].find(ANCHOR_CLOSE)? + ANCHOR_CLOSE.len();

        self.cursor = end;
        Some(&self.line[begin..end])
    }
}

impl<'a> Iterator for AnchorFragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let fragment = self.find_next();
        if fragment.is_none() {
            self.cursor = self.line.len();
        }
        fragment
    }
}

impl std::iter::FusedIterator for AnchorFragments<'_> {}
