//! Configuration management for scriban-indent.
//!
//! This module provides the [`Config`] struct which controls all formatting behavior.
//! Configuration can be loaded from:
//! - TOML files (`scriban-indent.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`<!-- scriban-indent: --indent 1 -->`)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::process::ReformatOptions;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["scriban-indent.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// Line terminator used when joining output lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Whichever terminator dominates the input
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEnding {
    /// Parse a CLI/directive value (`auto`, `lf`, `crlf`)
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "lf" => Some(Self::Lf),
            "crlf" => Some(Self::Crlf),
            _ => None,
        }
    }

    /// Concrete terminator for a given input text
    #[must_use]
    pub fn terminator_for(self, input: &str) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
            Self::Auto => {
                let crlf = input.matches("\r\n").count();
                let lf = input.matches('\n').count() - crlf;
                if crlf > lf {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

// Serde default functions
fn default_indent() -> usize {
    2
}
fn default_print_width() -> usize {
    120
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for scriban-indent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Indent characters per nesting level (default: 2)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Indent with tabs instead of spaces (default: true)
    #[serde(default = "default_true")]
    pub use_tabs: bool,

    /// Re-indent lines by HTML and Scriban nesting (default: true)
    #[serde(default = "default_true")]
    pub impose_indent: bool,

    /// Run the HTML reformatter before indenting (default: true)
    #[serde(default = "default_true")]
    pub impose_markup: bool,

    /// Line width handed to the HTML reformatter (default: 120)
    #[serde(default = "default_print_width")]
    pub print_width: usize,

    /// Output line terminator (default: auto)
    #[serde(default)]
    pub line_ending: LineEnding,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub indent: Option<usize>,
    pub use_tabs: Option<bool>,
    pub impose_indent: Option<bool>,
    pub impose_markup: Option<bool>,
    pub print_width: Option<usize>,
    pub line_ending: Option<LineEnding>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: 2,
            use_tabs: true,
            impose_indent: true,
            impose_markup: true,
            print_width: 120,
            line_ending: LineEnding::Auto,
        }
    }
}

impl Config {
    /// Maximum reasonable indent size
    const MAX_INDENT: usize = 16;
    /// Minimum reasonable print width
    const MIN_PRINT_WIDTH: usize = 40;
    /// Maximum reasonable print width
    const MAX_PRINT_WIDTH: usize = 1000;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent == 0 {
            return Some("indent must be at least 1".to_string());
        }
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
            ));
        }
        if self.print_width < Self::MIN_PRINT_WIDTH {
            return Some(format!(
                "print_width {} is below minimum of {}",
                self.print_width,
                Self::MIN_PRINT_WIDTH
            ));
        }
        if self.print_width > Self::MAX_PRINT_WIDTH {
            return Some(format!(
                "print_width {} exceeds maximum of {}",
                self.print_width,
                Self::MAX_PRINT_WIDTH
            ));
        }
        None
    }

    /// Literal text of one indent level
    #[must_use]
    pub fn indent_unit(&self) -> String {
        let ch = if self.use_tabs { "\t" } else { " " };
        ch.repeat(self.indent.max(1))
    }

    /// Options handed to the HTML reformatter
    ///
    /// The reformatter only decides layout; the indenter redoes every
    /// line's indentation afterwards, so one tab per level is enough.
    #[must_use]
    pub fn reformat_options(&self) -> ReformatOptions {
        ReformatOptions {
            indent_size: 1,
            use_tabs: true,
            print_width: self.print_width,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        if let Some(v) = partial.use_tabs {
            self.use_tabs = v;
        }
        if let Some(v) = partial.impose_indent {
            self.impose_indent = v;
        }
        if let Some(v) = partial.impose_markup {
            self.impose_markup = v;
        }
        if let Some(v) = partial.print_width {
            self.print_width = v;
        }
        if let Some(v) = partial.line_ending {
            self.line_ending = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so closer directories override
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
