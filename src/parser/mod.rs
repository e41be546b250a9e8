//! Line-level scanning of Scriban/HTML documents.
//!
//! This module provides the building blocks the indenter works with:
//! - [`segments`]: Splits a line into Scriban tag segments and surrounding markup,
//!   carrying the "inside an unterminated tag" state across lines
//! - [`markup`]: Counts HTML opening, closing and leading closing tags on a line
//! - [`patterns`]: Precompiled regex patterns for Scriban tags, keywords and markup

pub mod markup;
pub mod patterns;
pub mod segments;

pub use markup::{analyze_markup_line, is_void_element, MarkupCounts, VOID_ELEMENTS};
pub use segments::{clean_segment, extract_segments, LineSegments};
