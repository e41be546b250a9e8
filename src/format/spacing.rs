//! Spacing inside Scriban tags
//!
//! `{{x}}` becomes `{{ x }}`, `{{~x-}}` becomes `{{~ x -}}` and empty tags
//! collapse to `{{}}`. Lines made only of an opening or closing delimiter
//! belong to a multi-line tag and are left alone.

use std::borrow::Cow;

use regex::Captures;

use crate::parser::patterns::{ISOLATED_CLOSE_RE, ISOLATED_OPEN_RE, TAG_RE};

/// Check whether a line is nothing but an opening or closing delimiter
#[must_use]
pub fn is_isolated_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    ISOLATED_OPEN_RE.is_match(trimmed) || ISOLATED_CLOSE_RE.is_match(trimmed)
}

/// Normalize spacing of every complete tag on a line
#[must_use]
pub fn normalize_tag_spacing(line: &str) -> Cow<'_, str> {
    if is_isolated_delimiter(line) {
        return Cow::Borrowed(line);
    }

    TAG_RE.replace_all(line, |caps: &Captures| {
        let open = caps.get(1).map_or("", |m| m.as_str());
        let inner = caps.get(2).map_or("", |m| m.as_str()).trim();
        let close = caps.get(3).map_or("", |m| m.as_str());
        if inner.is_empty() {
            format!("{{{{{open}{close}}}}}")
        } else {
            format!("{{{{{open} {inner} {close}}}}}")
        }
    })
}

/// Normalize every line of a block, dropping blank lines
///
/// Used for `<style>` bodies that contain Scriban tags: the lines are
/// trimmed so the markup reformatter never sees them.
#[must_use]
pub fn normalize_block(inner: &str) -> String {
    inner
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalize_tag_spacing)
        .collect::<Vec<_>>()
        .join("\n")
}
