/// Regex patterns for Scriban tags and HTML markup
///
/// All patterns are compiled once at startup using `LazyLock`.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. This is acceptable because all patterns
/// in this module are compile-time constants that are verified by tests.
/// The panic occurs at first access of the `LazyLock` static.
fn build_re(pattern: &str, case_insensitive: bool) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// ===== SCRIBAN TAGS =====

/// A complete tag with optional trim markers: `{{~ inner -}}`
pub static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"\{\{([~-])?([\s\S]*?)([~-])?\}\}", false));

/// A complete tag of any shape, used for protection before markup reflow
pub static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\{\{[\s\S]*?\}\}", false));

/// A trimmed line that only opens a tag: `{{`, `{{~`, `{{-`
pub static ISOLATED_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\{\{[~-]?$", false));

/// A trimmed line that only closes a tag: `}}`, `~}}`, `-}}`
pub static ISOLATED_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^[~-]?\}\}$", false));

/// A line holding nothing but the end of a multi-line tag
pub static CLOSING_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^\s*[-~]?\s*\}\}$", false));

// ===== BLOCK KEYWORDS =====
// Only the first token of a segment is considered.

pub static CLOSE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*end\b", true));
pub static MIDDLE_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^\s*(else|elsif|when)\b", true));
pub static OPEN_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^\s*(if|for|case|while|capture|wrap)\b", true));

// ===== MARKUP =====

/// Any markup tag, including `<!...>` and `<?...>` declarations
pub static MARKUP_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"<[/!?]?[a-zA-Z][^>]*>", false));

/// A closing tag anchored at the current scan position
pub static LEADING_CLOSING_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^</[a-zA-Z][^>]*>", false));

/// Element name of an opening tag
pub static TAG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^<\s*([a-zA-Z0-9:-]+)", false));

/// `<style ...>body</style>` with captured attributes and body
pub static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"<style\b([^>]*)>([\s\S]*?)</style>", true));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for re in [
            &*TAG_RE,
            &*ANY_TAG_RE,
            &*ISOLATED_OPEN_RE,
            &*ISOLATED_CLOSE_RE,
            &*CLOSING_ONLY_RE,
            &*CLOSE_KEYWORD_RE,
            &*MIDDLE_KEYWORD_RE,
            &*OPEN_KEYWORD_RE,
            &*MARKUP_TAG_RE,
            &*LEADING_CLOSING_RE,
            &*TAG_NAME_RE,
            &*STYLE_BLOCK_RE,
        ] {
            assert!(!re.as_str().is_empty());
        }
    }

    #[test]
    fn test_tag_re_captures_markers() {
        let caps = TAG_RE.captures("{{~ x -}}").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("~"));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some(" x "));
        assert_eq!(caps.get(3).map(|m| m.as_str()), Some("-"));
    }

    #[test]
    fn test_tag_re_is_non_greedy() {
        let found: Vec<&str> = TAG_RE
            .find_iter("{{a}} text {{b}}")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["{{a}}", "{{b}}"]);
    }

    #[test]
    fn test_isolated_delimiters() {
        assert!(ISOLATED_OPEN_RE.is_match("{{"));
        assert!(ISOLATED_OPEN_RE.is_match("{{~"));
        assert!(!ISOLATED_OPEN_RE.is_match("{{ x"));
        assert!(ISOLATED_CLOSE_RE.is_match("-}}"));
        assert!(!ISOLATED_CLOSE_RE.is_match("x }}"));
    }

    #[test]
    fn test_closing_only_allows_inner_space() {
        assert!(CLOSING_ONLY_RE.is_match("}}"));
        assert!(CLOSING_ONLY_RE.is_match("~ }}"));
        assert!(!CLOSING_ONLY_RE.is_match("y }}"));
    }

    #[test]
    fn test_style_block_case_insensitive() {
        assert!(STYLE_BLOCK_RE.is_match("<STYLE media=\"x\">a</Style>"));
    }
}
