//! Placeholder tokens for opaque regions
//!
//! A region handed to the markup reformatter as a placeholder comes back
//! untouched. Tokens look like `__SCRIBAN_TAG_3__`; when the source already
//! contains the prefix, a numeric salt is appended until it no longer does.
//!
//! A region that owns whole lines is wrapped as `<!--__SCRIBAN_TAG_3__-->`.
//! The reformatter keeps comments on their own lines, while it happily joins
//! adjacent bare words.

use anyhow::bail;

use crate::error::Result;

/// A set of protected regions sharing one token prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    prefix: String,
    entries: Vec<String>,
    /// Parallel to `entries`: token was emitted inside an HTML comment
    wrapped: Vec<bool>,
}

/// Comment forms a wrapped token may come back in
fn wrapped_forms(token: &str) -> [String; 2] {
    [format!("<!--{token}-->"), format!("<!-- {token} -->")]
}

impl Placeholders {
    /// Create an empty set whose tokens cannot collide with `source`
    #[must_use]
    pub fn new(base: &str, source: &str) -> Self {
        let mut prefix = format!("__{base}_");
        let mut salt = 0usize;
        while source.contains(&prefix) {
            salt += 1;
            prefix = format!("__{base}{salt}_");
        }
        Self {
            prefix,
            entries: Vec::new(),
            wrapped: Vec::new(),
        }
    }

    /// Token for the entry at `index`
    #[must_use]
    pub fn token(&self, index: usize) -> String {
        format!("{}{index}__", self.prefix)
    }

    /// Store a region and return the token that stands in for it
    pub fn push(&mut self, content: impl Into<String>) -> String {
        let token = self.token(self.entries.len());
        self.entries.push(content.into());
        self.wrapped.push(false);
        token
    }

    /// Like [`push`](Self::push), but the token is wrapped in an HTML comment
    pub fn push_wrapped(&mut self, content: impl Into<String>) -> String {
        let token = self.push(content);
        if let Some(last) = self.wrapped.last_mut() {
            *last = true;
        }
        format!("<!--{token}-->")
    }

    /// Number of stored regions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored regions in insertion order
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Check that every token occurs exactly once in `text`
    ///
    /// Wrapped tokens must also still sit inside their comment.
    pub fn verify(&self, text: &str) -> Result<()> {
        for (index, wrapped) in self.wrapped.iter().enumerate() {
            let token = self.token(index);
            let count = text.matches(&token).count();
            if count != 1 {
                bail!("placeholder {token} found {count} times, expected once");
            }
            if *wrapped && !wrapped_forms(&token).iter().any(|form| text.contains(form)) {
                bail!("placeholder {token} lost its comment wrapper");
            }
        }
        Ok(())
    }

    /// Replace each token with its region, in insertion order
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        let mut output = text.to_string();
        for (index, (content, wrapped)) in self.entries.iter().zip(&self.wrapped).enumerate() {
            let token = self.token(index);
            let form = wrapped
                .then(|| wrapped_forms(&token).into_iter().find(|form| output.contains(form)))
                .flatten()
                .unwrap_or(token);
            output = output.replacen(&form, content, 1);
        }
        output
    }
}
