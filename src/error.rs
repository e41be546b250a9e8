//! Error types and result aliases for scriban-indent.
//!
//! Formatting itself never fails: reformatter errors are recovered inside
//! the pipeline. Errors surface only from I/O, config loading and logging
//! setup.
//!
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
