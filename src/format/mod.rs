//! Scriban/HTML line formatting.
//!
//! This module contains the core formatting logic organized into submodules:
//! - [`spacing`]: Normalizes the spaces inside `{{ ... }}` tags
//! - [`keywords`]: Classifies tag segments as block open, middle or close
//! - [`indenter`]: Merges HTML and Scriban nesting into one indent depth per line

pub mod indenter;
pub mod keywords;
pub mod spacing;

pub use indenter::{
    apply_indentation, indent_line, is_closing_only, IndentState, IndentedLine, ScribanIndenter,
};
pub use keywords::{analyze_segments, classify_segment, SegmentCounts, SegmentKind};
pub use spacing::{is_isolated_delimiter, normalize_block, normalize_tag_spacing};
