//! Document formatting pipeline.
//!
//! The HTML reformatter knows nothing about Scriban, so the pipeline hides
//! Scriban regions from it before it runs and restores them afterwards:
//!
//! 1. Protect `<style>` bodies holding Scriban tags, then every `{{ ... }}` tag
//! 2. Reflow the markup with a [`MarkupReformatter`] (failures fall back to its input)
//! 3. Restore tags, then style bodies
//! 4. Normalize tag spacing and re-indent line by line
//!
//! The main entry points are [`format_document`] for in-memory text and
//! [`format_file`] which reads from any `Read` and writes to any `Write`.

pub mod pipeline;
pub mod reformatter;

pub use pipeline::{format_document, format_edit, format_file};
pub use reformatter::{
    MarkupFmtReformatter, MarkupReformatter, PassthroughReformatter, ReformatOptions,
};
