//! Diagnostic logging setup.
//!
//! All diagnostics go to stderr so formatted output on stdout stays clean.
//! `RUST_LOG` takes precedence over the `--debug`/`--silent` defaults.

use tracing::metadata::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::Result;

/// Default level for the given CLI flags
#[must_use]
pub fn default_level(debug: bool, silent: bool) -> LevelFilter {
    if silent {
        LevelFilter::OFF
    } else if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the global tracing subscriber
pub fn setup_logging(debug: bool, silent: bool) -> Result<()> {
    let default_level = default_level(debug, silent);
    let default_env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse(default_level.to_string().to_ascii_lowercase())?;

    let env_filter = match std::env::var("RUST_LOG") {
        Ok(directive) if !directive.is_empty() => {
            match EnvFilter::builder().parse(&directive) {
                Ok(env_filter) => env_filter,
                Err(err) => {
                    eprintln!("invalid log filter: {err}");
                    eprintln!("falling back to default logging");
                    default_env_filter
                }
            }
        }
        _ => default_env_filter,
    };

    let use_color = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let fmt_layer = tracing_subscriber::fmt::Layer::new()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(use_color)
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
