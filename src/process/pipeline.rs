//! Formatting pipeline
//!
//! raw text -> protect style blocks -> protect tags -> HTML reformatter
//! -> restore tags -> restore style blocks -> indent
//!
//! Every step is best effort. A failing reformatter, or one that loses a
//! placeholder, only costs the HTML reflow; tag spacing and indentation are
//! still applied.

use std::io::{Read, Write};

use anyhow::Context;
use tracing::{debug, warn};

use super::reformatter::{MarkupFmtReformatter, MarkupReformatter};
use crate::config::Config;
use crate::format::{normalize_tag_spacing, ScribanIndenter};
use crate::protect::{protect_style_blocks, protect_tags, ProtectedStyles, ProtectedTags};
use crate::Result;

/// Run the reformatter, falling back to its input on any failure
fn reformat_guarded(
    styles: &ProtectedStyles,
    tags: &ProtectedTags,
    reformatter: &dyn MarkupReformatter,
    config: &Config,
) -> String {
    let reformatted = reformatter
        .format(&tags.text, &config.reformat_options())
        .and_then(|out| {
            tags.tags.verify(&out)?;
            styles.blocks.verify(&out)?;
            Ok(out)
        });
    match reformatted {
        Ok(out) => out,
        Err(err) => {
            warn!("HTML reformatter failed, keeping unformatted markup: {err:#}");
            tags.text.clone()
        }
    }
}

/// Format a whole document
///
/// Never fails: the worst outcome is the input with only tag spacing and
/// indentation applied.
#[must_use]
pub fn format_document(source: &str, config: &Config, reformatter: &dyn MarkupReformatter) -> String {
    let styles = protect_style_blocks(source);
    let tags = protect_tags(&styles.text);
    debug!(
        tags = tags.tags.len(),
        style_blocks = styles.blocks.len(),
        "protected scriban regions"
    );

    let reflowed = if config.impose_markup {
        reformat_guarded(&styles, &tags, reformatter, config)
    } else {
        tags.text.clone()
    };
    let restored = styles.restore(&tags.restore(&reflowed));

    let lines = restored
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));
    let output: Vec<String> = if config.impose_indent {
        ScribanIndenter::new(config.indent_unit()).process_lines(lines)
    } else {
        lines.map(|line| normalize_tag_spacing(line).into_owned()).collect()
    };

    output.join(config.line_ending.terminator_for(source))
}

/// Format a document for a host that applies whole-document edits
///
/// Returns `None` when formatting changes nothing.
#[must_use]
pub fn format_edit(
    source: &str,
    config: &Config,
    reformatter: &dyn MarkupReformatter,
) -> Option<String> {
    let formatted = format_document(source, config, reformatter);
    (formatted != source).then_some(formatted)
}

/// Format a document read from `input` and write it to `output`
///
/// HTML reflow uses [`MarkupFmtReformatter`].
pub fn format_file<R: Read, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<()> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .with_context(|| format!("failed to read {filename} as UTF-8 text"))?;

    debug!(filename, bytes = source.len(), "formatting");
    let formatted = format_document(&source, config, &MarkupFmtReformatter);
    output.write_all(formatted.as_bytes())?;
    Ok(())
}
