//! Inline directive parsing for `scriban-indent:` comments
//!
//! Supports in-file configuration overrides via an HTML comment:
//! `<!-- scriban-indent: --indent 1 --spaces --no-markup -->`

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{Config, LineEnding};

/// Pattern to match scriban-indent directives
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<!--\s*scriban-indent:\s*(.*?)\s*-->\s*$")
        .unwrap_or_else(|_| panic!("Invalid directive pattern"))
});

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveOverrides {
    pub indent: Option<usize>,
    pub use_tabs: Option<bool>,
    pub impose_indent: Option<bool>,
    pub impose_markup: Option<bool>,
    pub print_width: Option<usize>,
    pub line_ending: Option<LineEnding>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every set override to `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(v) = self.indent {
            config.indent = v;
        }
        if let Some(v) = self.use_tabs {
            config.use_tabs = v;
        }
        if let Some(v) = self.impose_indent {
            config.impose_indent = v;
        }
        if let Some(v) = self.impose_markup {
            config.impose_markup = v;
        }
        if let Some(v) = self.print_width {
            config.print_width = v;
        }
        if let Some(v) = self.line_ending {
            config.line_ending = v;
        }
    }
}

/// Check if a line contains a scriban-indent directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    DIRECTIVE_RE.is_match(line)
}

/// Parse a directive line and return option overrides
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a directive with known options
/// * `None` otherwise
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = DIRECTIVE_RE.captures(line)?;
    parse_directive_args(caps.get(1)?.as_str())
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let mut tokens = args_str.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "-i" | "--indent" => {
                overrides.indent = tokens.next().and_then(|v| v.parse().ok());
            }
            "-w" | "--print-width" => {
                overrides.print_width = tokens.next().and_then(|v| v.parse().ok());
            }
            "--line-ending" => {
                overrides.line_ending = tokens.next().and_then(LineEnding::parse);
            }
            "--spaces" => overrides.use_tabs = Some(false),
            "--tabs" => overrides.use_tabs = Some(true),
            "--no-indent" => overrides.impose_indent = Some(false),
            "--enable-indent" => overrides.impose_indent = Some(true),
            "--no-markup" => overrides.impose_markup = Some(false),
            "--enable-markup" => overrides.impose_markup = Some(true),
            _ => {
                // Unknown option, skip
            }
        }
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan input for a directive and return the first one found
///
/// Only the first directive is used (subsequent ones are ignored).
pub fn find_directive<R: BufRead>(input: &mut R) -> Option<DirectiveOverrides> {
    let mut buffer = String::new();

    while input.read_line(&mut buffer).ok()? > 0 {
        if is_directive_line(&buffer) {
            return parse_directive(&buffer);
        }
        buffer.clear();
    }

    None
}
