//! Block keyword classification of Scriban segments
//!
//! Only the first token of a segment counts, so `end` inside an expression
//! such as `x.end()` or a lambda body is not mistaken for a block close.
//! A segment whose first word merely collides with a keyword (a variable
//! named `case`, say) is misclassified; that is an accepted limitation.

use crate::parser::patterns::{CLOSE_KEYWORD_RE, MIDDLE_KEYWORD_RE, OPEN_KEYWORD_RE};
use crate::parser::segments::clean_segment;

/// Role of a segment in block structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// `if`, `for`, `case`, `while`, `capture`, `wrap`
    Open,
    /// `else`, `elsif`, `when`
    Middle,
    /// `end`
    Close,
    /// Anything else
    None,
}

/// Classify one segment by its leading keyword
#[must_use]
pub fn classify_segment(segment: &str) -> SegmentKind {
    let segment = clean_segment(segment);
    if CLOSE_KEYWORD_RE.is_match(segment) {
        SegmentKind::Close
    } else if MIDDLE_KEYWORD_RE.is_match(segment) {
        SegmentKind::Middle
    } else if OPEN_KEYWORD_RE.is_match(segment) {
        SegmentKind::Open
    } else {
        SegmentKind::None
    }
}

/// Keyword counts over all segments of a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentCounts {
    pub open: usize,
    pub middle: usize,
    pub close: usize,
}

impl SegmentCounts {
    /// Levels removed before the line itself is rendered
    #[must_use]
    pub fn dedent_before(&self) -> usize {
        self.close + self.middle
    }

    /// Levels added for the lines that follow
    #[must_use]
    pub fn indent_after(&self) -> usize {
        self.open + self.middle
    }
}

/// Count open, middle and close keywords over a line's segments
#[must_use]
pub fn analyze_segments<S: AsRef<str>>(segments: &[S]) -> SegmentCounts {
    let mut counts = SegmentCounts::default();
    for segment in segments {
        match classify_segment(segment.as_ref()) {
            SegmentKind::Open => counts.open += 1,
            SegmentKind::Middle => counts.middle += 1,
            SegmentKind::Close => counts.close += 1,
            SegmentKind::None => {}
        }
    }
    counts
}
