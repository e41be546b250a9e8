//! Whole Scriban tags swapped for placeholders
//!
//! A tag may span lines; it is replaced as a unit so the markup reformatter
//! never reflows or escapes it. Tags sharing a line with other text become a
//! bare word; tags owning their lines become a comment, which the reformatter
//! keeps on a line of its own.

use super::placeholder::Placeholders;
use crate::parser::patterns::ANY_TAG_RE;

const TAG_TOKEN_BASE: &str = "SCRIBAN_TAG";

/// Text with every complete Scriban tag replaced by a placeholder
#[derive(Debug, Clone)]
pub struct ProtectedTags {
    pub text: String,
    pub tags: Placeholders,
}

/// Check whether `text[start..end]` has only whitespace around it on its lines
fn owns_lines(text: &str, start: usize, end: usize) -> bool {
    let before = &text[..start];
    let line_head = &before[before.rfind('\n').map_or(0, |i| i + 1)..];
    let after = &text[end..];
    let line_tail = &after[..after.find('\n').unwrap_or(after.len())];
    line_head.trim().is_empty() && line_tail.trim().is_empty()
}

/// Replace every `{{ ... }}` tag
#[must_use]
pub fn protect_tags(text: &str) -> ProtectedTags {
    let mut tags = Placeholders::new(TAG_TOKEN_BASE, text);
    let protected = ANY_TAG_RE.replace_all(text, |caps: &regex::Captures| {
        let whole = &caps[0];
        let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
        if owns_lines(text, start, end) {
            tags.push_wrapped(whole)
        } else {
            tags.push(whole)
        }
    });
    ProtectedTags {
        text: protected.into_owned(),
        tags,
    }
}

impl ProtectedTags {
    /// Put the original tags back
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        self.tags.restore(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_replaced_in_order() {
        let protected = protect_tags("<a href=\"{{ url }}\">{{title}}</a>");
        assert_eq!(
            protected.text,
            "<a href=\"__SCRIBAN_TAG_0__\">__SCRIBAN_TAG_1__</a>"
        );
        assert_eq!(protected.tags.entries(), ["{{ url }}", "{{title}}"]);
    }

    #[test]
    fn test_multiline_tag_is_one_unit() {
        let input = "<p>{{ if a &&\n   b }}</p>";
        let protected = protect_tags(input);
        assert_eq!(protected.text, "<p>__SCRIBAN_TAG_0__</p>");
        assert_eq!(protected.restore(&protected.text), input);
    }

    #[test]
    fn test_tags_on_own_lines_are_wrapped() {
        let input = "<div>\n  {{ if a }}\n{{ for x in y }}\t\n<p>{{ x }}</p>\n{{ end }}\r\n{{ end }}\n</div>";
        let protected = protect_tags(input);
        assert_eq!(
            protected.text,
            "<div>\n  <!--__SCRIBAN_TAG_0__-->\n<!--__SCRIBAN_TAG_1__-->\t\n\
             <p>__SCRIBAN_TAG_2__</p>\n<!--__SCRIBAN_TAG_3__-->\r\n<!--__SCRIBAN_TAG_4__-->\n</div>"
        );
        assert_eq!(protected.restore(&protected.text), input);
    }

    #[test]
    fn test_two_tags_on_one_line_stay_bare() {
        let protected = protect_tags("{{ end }}{{ if y }}\n{{ x }} text");
        assert_eq!(protected.text, "__SCRIBAN_TAG_0____SCRIBAN_TAG_1__\n__SCRIBAN_TAG_2__ text");
    }

    #[test]
    fn test_multiline_tag_owning_lines_is_wrapped() {
        let input = "<div>\n{{-\n  x = 1\n-}}\n</div>";
        let protected = protect_tags(input);
        assert_eq!(protected.text, "<div>\n<!--__SCRIBAN_TAG_0__-->\n</div>");
        assert_eq!(protected.restore(&protected.text), input);
    }

    #[test]
    fn test_unterminated_tag_left_in_place() {
        let input = "<p>{{ if a</p>";
        let protected = protect_tags(input);
        assert_eq!(protected.text, input);
        assert!(protected.tags.is_empty());
    }
}
