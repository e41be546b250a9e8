/// Scriban segment extraction
///
/// Splits one physical line into the inner texts of the Scriban tags it
/// touches and the markup that lies outside of them. A tag may open on one
/// line and close several lines later, so the caller carries an
/// "inside a tag" flag from one line to the next.

/// Opening delimiter of a Scriban tag
pub const TAG_OPEN: &str = "{{";
/// Closing delimiter of a Scriban tag
pub const TAG_CLOSE: &str = "}}";

/// Result of scanning one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSegments {
    /// Inner text of each tag occurrence, trimmed of whitespace and `~`/`-` markers
    pub segments: Vec<String>,
    /// Text outside of every tag on the line
    pub markup: String,
}

/// Strip surrounding whitespace and trim markers from a segment
#[must_use]
pub fn clean_segment(segment: &str) -> &str {
    segment.trim_matches(|c: char| c.is_whitespace() || c == '~' || c == '-')
}

/// Scan a line for Scriban segments
///
/// `in_tag` is the carried state: true when a tag opened on an earlier line
/// is still unterminated. Scanning then resumes inside that tag without
/// searching for `{{`. On return `in_tag` tells whether the line ended
/// inside a tag; in that case the unterminated remainder is still emitted
/// as a segment.
#[must_use]
pub fn extract_segments(line: &str, in_tag: &mut bool) -> LineSegments {
    let mut result = LineSegments::default();
    let mut index = 0;
    let mut inside = *in_tag;

    while index < line.len() {
        let rest = &line[index..];
        if inside {
            if let Some(end) = rest.find(TAG_CLOSE) {
                result.segments.push(rest[..end].to_string());
                index += end + TAG_CLOSE.len();
                inside = false;
            } else {
                result.segments.push(rest.to_string());
                index = line.len();
            }
        } else if let Some(start) = rest.find(TAG_OPEN) {
            result.markup.push_str(&rest[..start]);
            index += start + TAG_OPEN.len();
            inside = true;
        } else {
            result.markup.push_str(rest);
            index = line.len();
        }
    }

    *in_tag = inside;
    for segment in &mut result.segments {
        let cleaned = clean_segment(segment);
        if cleaned.len() != segment.len() {
            *segment = cleaned.to_string();
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tag() {
        let mut in_tag = false;
        let scan = extract_segments("<b>{{ name }}</b>", &mut in_tag);
        assert_eq!(scan.segments, vec!["name"]);
        assert_eq!(scan.markup, "<b></b>");
        assert!(!in_tag);
    }

    #[test]
    fn test_trim_markers_stripped() {
        let mut in_tag = false;
        let scan = extract_segments("{{~ if x -}}", &mut in_tag);
        assert_eq!(scan.segments, vec!["if x"]);
    }

    #[test]
    fn test_multiple_tags() {
        let mut in_tag = false;
        let scan = extract_segments("{{ if a }}x{{ else }}y{{ end }}", &mut in_tag);
        assert_eq!(scan.segments, vec!["if a", "else", "end"]);
        assert_eq!(scan.markup, "xy");
    }

    #[test]
    fn test_unterminated_tag_sets_state() {
        let mut in_tag = false;
        let scan = extract_segments("<p>{{ if x", &mut in_tag);
        assert_eq!(scan.segments, vec!["if x"]);
        assert_eq!(scan.markup, "<p>");
        assert!(in_tag);
    }

    #[test]
    fn test_resume_inside_tag() {
        let mut in_tag = true;
        let scan = extract_segments("y > 1 }}<span>{{ name }}", &mut in_tag);
        assert_eq!(scan.segments, vec!["y > 1", "name"]);
        assert_eq!(scan.markup, "<span>");
        assert!(!in_tag);
    }

    #[test]
    fn test_continuation_line_stays_inside() {
        let mut in_tag = true;
        let scan = extract_segments("a < b && c > d", &mut in_tag);
        assert_eq!(scan.segments, vec!["a < b && c > d"]);
        assert!(scan.markup.is_empty());
        assert!(in_tag);
    }

    #[test]
    fn test_closing_only_line() {
        let mut in_tag = true;
        let scan = extract_segments("~}}", &mut in_tag);
        assert_eq!(scan.segments, vec![""]);
        assert!(!in_tag);
    }

    #[test]
    fn test_no_tags() {
        let mut in_tag = false;
        let scan = extract_segments("<div class=\"a\">", &mut in_tag);
        assert!(scan.segments.is_empty());
        assert_eq!(scan.markup, "<div class=\"a\">");
    }

    #[test]
    fn test_multibyte_text() {
        let mut in_tag = false;
        let scan = extract_segments("é{{ ü }}ß", &mut in_tag);
        assert_eq!(scan.segments, vec!["ü"]);
        assert_eq!(scan.markup, "éß");
    }
}
