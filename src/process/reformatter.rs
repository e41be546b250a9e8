//! HTML reformatter collaborators
//!
//! The pipeline treats the HTML reformatter as a black box: placeholder
//! bearing text goes in, reflowed text comes out, and any failure is
//! recovered by the caller.

use std::borrow::Cow;
use std::convert::Infallible;

use anyhow::anyhow;
use markup_fmt::config::{FormatOptions, LayoutOptions};
use markup_fmt::Language;

use crate::error::Result;

/// Layout options handed to a reformatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReformatOptions {
    /// Indent width, in tabs or spaces
    pub indent_size: usize,
    pub use_tabs: bool,
    /// Preferred maximum line width
    pub print_width: usize,
}

/// An HTML reformatter
///
/// Implementations must keep placeholder tokens (plain words such as
/// `__SCRIBAN_TAG_0__`) verbatim. They may fail; the pipeline falls back to
/// the text it passed in.
pub trait MarkupReformatter {
    fn format(&self, text: &str, options: &ReformatOptions) -> Result<String>;
}

/// Reformatter backed by the `markup_fmt` crate in HTML mode
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupFmtReformatter;

impl MarkupReformatter for MarkupFmtReformatter {
    fn format(&self, text: &str, options: &ReformatOptions) -> Result<String> {
        let format_options = FormatOptions {
            layout: LayoutOptions {
                print_width: options.print_width,
                use_tabs: options.use_tabs,
                indent_width: options.indent_size,
                ..LayoutOptions::default()
            },
            ..FormatOptions::default()
        };
        // Embedded CSS and JS are passed through unchanged
        markup_fmt::format_text(text, Language::Html, &format_options, |code, _| {
            Ok::<_, Infallible>(Cow::Borrowed(code))
        })
        .map_err(|err| anyhow!("html reformatter failed: {err:?}"))
    }
}

/// Reformatter that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughReformatter;

impl MarkupReformatter for PassthroughReformatter {
    fn format(&self, text: &str, _options: &ReformatOptions) -> Result<String> {
        Ok(text.to_string())
    }
}
