/// HTML nesting analysis for a single line
///
/// Counts opening and closing tags on the markup part of a line (Scriban
/// segments already removed). Nothing is validated: unbalanced markup is
/// counted as found.
use super::patterns::{LEADING_CLOSING_RE, MARKUP_TAG_RE, TAG_NAME_RE};

/// Elements that never take a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Tag counts for one line of markup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkupCounts {
    /// Opening tags that expect a matching closing tag
    pub opening_tags: usize,
    /// All closing tags on the line
    pub closing_tags: usize,
    /// Closing tags that appear back to back at the start of the line
    pub leading_closings: usize,
}

impl MarkupCounts {
    /// Closing tags that are not leading ones
    ///
    /// These close elements opened earlier on the same line, or earlier lines,
    /// and only affect the level of the following line.
    #[must_use]
    pub fn remaining_closings(&self) -> usize {
        self.closing_tags.saturating_sub(self.leading_closings)
    }
}

/// Check whether an element name is a void element (case-insensitive)
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Count leading closing tags at the first non-whitespace character
fn count_leading_closings(markup: &str) -> usize {
    let mut rest = markup.trim_start();
    let mut count = 0;
    while let Some(m) = LEADING_CLOSING_RE.find(rest) {
        count += 1;
        rest = &rest[m.end()..];
    }
    count
}

/// Analyze the markup of one line
#[must_use]
pub fn analyze_markup_line(markup: &str) -> MarkupCounts {
    let mut counts = MarkupCounts {
        leading_closings: count_leading_closings(markup),
        ..MarkupCounts::default()
    };

    for m in MARKUP_TAG_RE.find_iter(markup) {
        let tag = m.as_str();
        if tag.starts_with("</") {
            counts.closing_tags += 1;
            continue;
        }
        // Comments, doctype and processing instructions
        if tag.starts_with("<!") || tag.starts_with("<?") {
            continue;
        }
        if tag.ends_with("/>") {
            continue;
        }
        let name = TAG_NAME_RE
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map_or("", |name| name.as_str());
        if is_void_element(name) {
            continue;
        }
        counts.opening_tags += 1;
    }

    counts
}
