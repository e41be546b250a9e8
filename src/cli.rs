//! Command-line interface for scriban-indent.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::config::LineEnding;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format (`-` reads stdin)
    pub inputs: Vec<PathBuf>,

    /// Indent unit width, in tabs or spaces
    pub indent: Option<usize>,

    /// Indent with spaces instead of tabs
    pub spaces: bool,

    /// Indent with tabs (overrides a config file that selects spaces)
    pub tabs: bool,

    /// Preferred maximum line width for HTML reflow
    pub print_width: Option<usize>,

    /// Skip the HTML reformatter
    pub no_markup: bool,

    /// Skip re-indentation
    pub no_indent: bool,

    /// Output line terminator
    pub line_ending: Option<LineEnding>,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Show diff without modifying files
    pub diff: bool,

    /// Exit non-zero if any file would change, without writing
    pub check: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom template file extensions (in addition to defaults)
    pub extensions: Vec<String>,

    /// Exclude files with more than this many lines
    pub exclude_max_lines: Option<usize>,

    /// Enable debug output
    pub debug: bool,
}

fn parse_line_ending(value: &str) -> Result<LineEnding, String> {
    LineEnding::parse(value).ok_or_else(|| format!("expected auto, lf or crlf, got '{value}'"))
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("scriban-indent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Formatter for HTML files with embedded Scriban templates")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format ('-' for stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("indent")
                .short('i')
                .long("indent")
                .help("Indent characters per nesting level [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("spaces")
                .long("spaces")
                .help("Indent with spaces instead of tabs")
                .action(ArgAction::SetTrue)
                .conflicts_with("tabs"),
        )
        .arg(
            Arg::new("tabs")
                .long("tabs")
                .help("Indent with tabs [default]")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-width")
                .short('w')
                .long("print-width")
                .help("Preferred line width for HTML reflow [default: 120]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("no-markup")
                .long("no-markup")
                .help("Do not reflow HTML, only fix tag spacing and indentation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-indent")
                .long("no-indent")
                .help("Do not re-indent lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("line-ending")
                .long("line-ending")
                .help("Output line terminator: auto, lf or crlf [default: auto]")
                .value_name("MODE")
                .value_parser(parse_line_ending),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .short('d')
                .long("diff")
                .help("Show diff without modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Exit with status 1 if any file would be reformatted")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively format directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("extension")
                .short('x')
                .long("extension")
                .help("Additional template file extension (can be repeated, e.g., -x tpl -x liquid)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-max-lines")
                .short('m')
                .long("exclude-max-lines")
                .help("Exclude files with more than this many lines")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config, per-line indentation decisions)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        indent: matches.get_one::<usize>("indent").copied(),
        spaces: matches.get_flag("spaces"),
        tabs: matches.get_flag("tabs"),
        print_width: matches.get_one::<usize>("print-width").copied(),
        no_markup: matches.get_flag("no-markup"),
        no_indent: matches.get_flag("no-indent"),
        line_ending: matches.get_one::<LineEnding>("line-ending").copied(),
        stdout: matches.get_flag("stdout"),
        diff: matches.get_flag("diff"),
        check: matches.get_flag("check"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        extensions: matches
            .get_many::<String>("extension")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        exclude_max_lines: matches.get_one::<usize>("exclude-max-lines").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
    }
}
