//! scriban-indent - Formatter for HTML with embedded Scriban templates

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use glob::Pattern;
use rayon::prelude::*;
use scriban_indent::logging::setup_logging;
use scriban_indent::process::{format_edit, MarkupFmtReformatter};
use scriban_indent::{find_directive, parse_args, CliArgs, Config, Result};
use similar::TextDiff;
use tracing::debug;
use walkdir::WalkDir;

/// Template file extensions to process
const TEMPLATE_EXTENSIONS: &[&str] = &[
    "html",
    "htm",
    "sbn",
    "sbnhtml",
    "sbn-html",
    "scriban",
    "scriban-html",
];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// What happened to one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Changed,
    Skipped,
}

/// Per-run counters shared across worker threads
#[derive(Debug, Default)]
struct Tally {
    unchanged: AtomicUsize,
    changed: AtomicUsize,
    skipped: AtomicUsize,
    errors: AtomicUsize,
}

impl Tally {
    fn record(&self, path: &Path, result: Result<Outcome>) {
        let counter = match result {
            Ok(Outcome::Unchanged) => &self.unchanged,
            Ok(Outcome::Changed) => &self.changed,
            Ok(Outcome::Skipped) => &self.skipped,
            Err(e) => {
                eprintln!("Error formatting {}: {e:#}", path.display());
                &self.errors
            }
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = parse_args();

    if let Err(e) = setup_logging(args.debug, args.silent) {
        eprintln!("Warning: failed to set up logging: {e}");
    }

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let base_config = if args.config.is_none() {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No template files found to format.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let tally = Tally::default();
    // Ordered output needs sequential processing
    let use_sequential = args.stdout || args.diff || args.jobs == Some(1);
    if use_sequential {
        for path in &files {
            tally.record(path, process_path(path, base_config.as_ref(), &args));
        }
    } else {
        files.par_iter().for_each(|path| {
            tally.record(path, process_path(path, base_config.as_ref(), &args));
        });
    }

    let changed = tally.changed.load(Ordering::Relaxed);
    let unchanged = tally.unchanged.load(Ordering::Relaxed);
    let skipped = tally.skipped.load(Ordering::Relaxed);
    let errors = tally.errors.load(Ordering::Relaxed);

    if !args.silent && !args.stdout {
        let verb = if args.check || args.diff {
            "would be reformatted"
        } else {
            "reformatted"
        };
        eprintln!(
            "{changed} files {verb}, {unchanged} unchanged, {skipped} skipped, {errors} errors."
        );
    }

    if errors > 0 || (args.check && changed > 0) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        debug!("using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            debug!("no config files discovered for {}", start.display());
        }
        for f in &discovered {
            debug!("discovered config file {}", f.display());
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    if args.spaces {
        config.use_tabs = false;
    }
    if args.tabs {
        config.use_tabs = true;
    }
    if let Some(print_width) = args.print_width {
        config.print_width = print_width;
    }
    if args.no_markup {
        config.impose_markup = false;
    }
    if args.no_indent {
        config.impose_indent = false;
    }
    if let Some(line_ending) = args.line_ending {
        config.line_ending = line_ending;
    }

    debug!(?config, "effective configuration");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let custom_extensions = &args.extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // WalkDir reports symlink loops as errors; those entries are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_template_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                // Non-recursive: only direct children
                for entry in entries.filter_map(std::result::Result::ok) {
                    let path = entry.path();
                    if path.is_file()
                        && is_template_file(&path, custom_extensions)
                        && !is_excluded(&path, &exclude_patterns)
                    {
                        files.push(path);
                    }
                }
            }
        } else {
            eprintln!("Warning: {} does not exist", input.display());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if pattern.matches(&path_str) {
            return true;
        }

        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Directory patterns match any component
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Count the number of lines in a byte buffer
#[allow(clippy::naive_bytecount)]
fn count_lines(contents: &[u8]) -> usize {
    let newlines = contents.iter().filter(|&&b| b == b'\n').count();
    if contents.is_empty() {
        0
    } else if contents.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has a template extension
///
/// Extensions compare case-insensitively; custom ones may carry a leading dot.
fn is_template_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
                || custom_extensions.iter().any(|custom| {
                    custom
                        .strip_prefix('.')
                        .unwrap_or(custom)
                        .eq_ignore_ascii_case(ext)
                })
        })
}

/// Resolve the config for one file, then process it
fn process_path(path: &Path, base_config: Option<&Config>, args: &CliArgs) -> Result<Outcome> {
    match base_config {
        Some(config) => process_single_file(path, config, args),
        None => process_single_file(path, &build_config(args, Some(path))?, args),
    }
}

/// Apply directive overrides from file contents to a configuration
fn apply_directive_overrides(config: &mut Config, contents: &[u8], source_name: &str) {
    let cursor = Cursor::new(contents);
    if let Some(overrides) = find_directive(&mut BufReader::new(cursor)) {
        debug!(?overrides, "found file directive in {source_name}");
        overrides.apply(config);
    }
}

/// Format decoded contents under a per-file copy of `config`
fn format_contents(contents: &[u8], config: &Config, source_name: &str) -> Result<Option<String>> {
    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, contents, source_name);
    if let Some(error) = file_config.validate() {
        anyhow::bail!("Invalid directive in {source_name}: {error}");
    }

    let source = std::str::from_utf8(contents)
        .with_context(|| format!("failed to read {source_name} as UTF-8 text"))?;
    Ok(format_edit(source, &file_config, &MarkupFmtReformatter))
}

/// Render a unified diff between original and formatted text
fn unified_diff(original: &str, formatted: &str, name: &str) -> String {
    let diff = TextDiff::from_lines(original, formatted);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("{name} (original)"), &format!("{name} (formatted)"))
        .to_string()
}

/// Process a single file
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<Outcome> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                file_size / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(Outcome::Skipped);
    }

    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&file_contents);
        if line_count > max_lines {
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} lines exceeds limit of {})",
                    path.display(),
                    line_count,
                    max_lines
                );
            }
            return Ok(Outcome::Skipped);
        }
    }

    let name = path.to_string_lossy();
    debug!("formatting {name}");
    let edit = format_contents(&file_contents, config, &name)?;

    if args.stdout {
        // Unchanged files are echoed so piping stays lossless
        let text = match &edit {
            Some(formatted) => formatted.as_bytes(),
            None => file_contents.as_slice(),
        };
        io::stdout().write_all(text)?;
    }

    let Some(formatted) = edit else {
        return Ok(Outcome::Unchanged);
    };

    if args.diff {
        let original = String::from_utf8_lossy(&file_contents);
        io::stdout().write_all(unified_diff(&original, &formatted, &name).as_bytes())?;
    } else if args.check {
        if !args.silent {
            eprintln!("Would reformat: {name}");
        }
    } else if !args.stdout {
        std::fs::write(path, formatted.as_bytes())
            .with_context(|| format!("failed to write {name}"))?;
    }

    Ok(Outcome::Changed)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<ExitCode> {
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let edit = format_contents(&stdin_contents, config, "stdin")?;

    if args.check {
        return Ok(if edit.is_some() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    match edit {
        Some(formatted) if args.diff => {
            let original = String::from_utf8_lossy(&stdin_contents);
            io::stdout().write_all(unified_diff(&original, &formatted, "stdin").as_bytes())?;
        }
        Some(formatted) => io::stdout().write_all(formatted.as_bytes())?,
        None if args.diff => {}
        None => io::stdout().write_all(&stdin_contents)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn print_usage() {
    println!(
        "scriban-indent v{} - HTML + Scriban template formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  scriban-indent [OPTIONS] <FILE>...");
    println!("  scriban-indent [OPTIONS] -r <DIRECTORY>");
    println!("  scriban-indent [OPTIONS] -              # Read from stdin");
    println!("  cat page.html | scriban-indent          # Pipe input");
    println!();
    println!("Examples:");
    println!("  scriban-indent page.html                # Format single file in-place");
    println!("  scriban-indent -r templates/            # Recursively format directory");
    println!("  scriban-indent --check -r templates/    # Fail if anything would change");
    println!("  scriban-indent -d page.html             # Show what would change");
    println!("  scriban-indent -i 4 --spaces page.html  # Indent with four spaces");
    println!();
    println!("Options:");
    println!("  -i, --indent <NUM>              Indent characters per level [default: 2]");
    println!("      --spaces                    Indent with spaces");
    println!("      --tabs                      Indent with tabs [default]");
    println!("  -w, --print-width <NUM>         Line width for HTML reflow [default: 120]");
    println!("      --no-markup                 Skip HTML reflow");
    println!("      --no-indent                 Skip re-indentation");
    println!("      --line-ending <MODE>        auto, lf or crlf [default: auto]");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -x, --extension <EXT>           Additional template extension (repeatable)");
    println!("  -m, --exclude-max-lines <NUM>   Skip files with more than NUM lines");
    println!("  -s, --stdout                    Output to stdout");
    println!("  -d, --diff                      Show unified diff");
    println!("      --check                     Exit 1 if any file would change");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -D, --debug                     Enable debug output");
    println!("  -S, --silent                    Silent mode");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  -h, --help                      Print help");
    println!();
    println!("Supported extensions: .html, .htm, .sbn, .sbnhtml, .sbn-html, .scriban, .scriban-html");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for scriban-indent.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks scriban-indent.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
    println!();
    println!("In-file directive:");
    println!("  <!-- scriban-indent: --indent 4 --spaces -->");
}
