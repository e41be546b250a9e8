//! scriban-indent - Formatter for HTML with embedded Scriban templates
//!
//! Scriban `{{ ... }}` tags are protected from the HTML reformatter,
//! normalized to `{{ inner }}` spacing, and every line is re-indented by
//! combined HTML and Scriban block nesting.
//!
//! - [`parser`]: regex patterns, segment extraction, markup counting
//! - [`format`]: tag spacing, keyword classification, the indenter
//! - [`protect`]: placeholder substitution for tags and style blocks
//! - [`process`]: the formatting pipeline and HTML reformatters

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod format;
pub mod logging;
pub mod parser;
pub mod process;
pub mod protect;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::{Config, LineEnding};
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use error::Result;
pub use process::{format_document, format_edit, format_file};
