//! `<style>` blocks that contain Scriban tags
//!
//! The body of such a block is normalized on its own and swapped for a
//! placeholder, so the markup reformatter's CSS handling never sees it.

use regex::Captures;

use super::placeholder::Placeholders;
use crate::format::spacing::normalize_block;
use crate::parser::patterns::STYLE_BLOCK_RE;
use crate::parser::segments::{TAG_CLOSE, TAG_OPEN};

const STYLE_TOKEN_BASE: &str = "SCRIBAN_STYLE_BLOCK";

/// Text with Scriban-bearing style bodies replaced by placeholders
#[derive(Debug, Clone)]
pub struct ProtectedStyles {
    pub text: String,
    pub blocks: Placeholders,
}

/// Replace the body of every `<style>` block holding a Scriban tag
#[must_use]
pub fn protect_style_blocks(text: &str) -> ProtectedStyles {
    let mut blocks = Placeholders::new(STYLE_TOKEN_BASE, text);
    let protected = STYLE_BLOCK_RE.replace_all(text, |caps: &Captures| {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let inner = caps.get(2).map_or("", |m| m.as_str());
        if !inner.contains(TAG_OPEN) || !inner.contains(TAG_CLOSE) {
            return caps[0].to_string();
        }
        let token = blocks.push(normalize_block(inner));
        format!("<style{attrs}>\n{token}\n</style>")
    });
    ProtectedStyles {
        text: protected.into_owned(),
        blocks,
    }
}

impl ProtectedStyles {
    /// Put the normalized style bodies back
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        self.blocks.restore(text)
    }
}
