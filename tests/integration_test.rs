//! Integration tests for scriban-indent
//!
//! These tests verify that the protection, reformatting, restoration and
//! indentation stages work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{BufReader, Cursor};

use scriban_indent::format::{apply_indentation, ScribanIndenter};
use scriban_indent::process::{
    format_document, format_edit, format_file, MarkupFmtReformatter, MarkupReformatter,
    PassthroughReformatter, ReformatOptions,
};
use scriban_indent::{find_directive, Config, LineEnding, Result};

/// Puts every adjacent pair of HTML tags on its own line
struct SplittingReformatter;

impl MarkupReformatter for SplittingReformatter {
    fn format(&self, text: &str, _options: &ReformatOptions) -> Result<String> {
        Ok(text.replace("><", ">\n<"))
    }
}

/// Always fails, like a reformatter choking on malformed markup
struct FailingReformatter;

impl MarkupReformatter for FailingReformatter {
    fn format(&self, _text: &str, _options: &ReformatOptions) -> Result<String> {
        anyhow::bail!("unexpected closing tag")
    }
}

/// Succeeds but throws the placeholders away
struct LossyReformatter;

impl MarkupReformatter for LossyReformatter {
    fn format(&self, _text: &str, _options: &ReformatOptions) -> Result<String> {
        Ok("<div></div>".to_string())
    }
}

/// Duplicates its input, so every placeholder appears twice
struct DuplicatingReformatter;

impl MarkupReformatter for DuplicatingReformatter {
    fn format(&self, text: &str, _options: &ReformatOptions) -> Result<String> {
        Ok(format!("{text}\n{text}"))
    }
}

fn tab_config() -> Config {
    Config {
        indent: 1,
        ..Config::default()
    }
}

const PAGE: &str = "<!DOCTYPE html>
<html>
<body>
{{if user}}
<p>Hello {{user.name}}</p>
{{else}}
<p>Guest</p>
{{end}}
<ul>
{{for item in items}}
<li class=\"{{item.cls}}\">{{item.title}}</li>
{{end}}
</ul>
</body>
</html>
";

const PAGE_FORMATTED: &str = "<!DOCTYPE html>
<html>
\t<body>
\t\t{{ if user }}
\t\t\t<p>Hello {{ user.name }}</p>
\t\t{{ else }}
\t\t\t<p>Guest</p>
\t\t{{ end }}
\t\t<ul>
\t\t\t{{ for item in items }}
\t\t\t\t<li class=\"{{ item.cls }}\">{{ item.title }}</li>
\t\t\t{{ end }}
\t\t</ul>
\t</body>
</html>
";

#[test]
fn test_complete_page() {
    let out = format_document(PAGE, &tab_config(), &PassthroughReformatter);
    assert_eq!(out, PAGE_FORMATTED);
}

#[test]
fn test_complete_page_without_reflow() {
    let config = Config {
        impose_markup: false,
        ..tab_config()
    };
    let out = format_document(PAGE, &config, &PassthroughReformatter);
    assert_eq!(out, PAGE_FORMATTED);
}

#[test]
fn test_formatting_is_idempotent() {
    let once = format_document(PAGE, &tab_config(), &PassthroughReformatter);
    let twice = format_document(&once, &tab_config(), &PassthroughReformatter);
    assert_eq!(once, twice);
    assert!(format_edit(&once, &tab_config(), &PassthroughReformatter).is_none());
}

#[test]
fn test_reflowed_markup_is_reindented() {
    let source = "<div><p>{{x}}</p><span title=\"{{ t }}\">{{y}}</span></div>";
    let out = format_document(source, &tab_config(), &SplittingReformatter);
    assert_eq!(
        out,
        "<div>\n\t<p>{{ x }}</p>\n\t<span title=\"{{ t }}\">{{ y }}</span>\n</div>"
    );
}

#[test]
fn test_reformatter_never_sees_scriban() {
    struct AssertingReformatter;

    impl MarkupReformatter for AssertingReformatter {
        fn format(&self, text: &str, options: &ReformatOptions) -> Result<String> {
            assert!(!text.contains("{{"), "tag leaked: {text}");
            assert!(!text.contains("}}"), "tag leaked: {text}");
            assert_eq!(options.indent_size, 1);
            assert!(options.use_tabs);
            Ok(text.to_string())
        }
    }

    let source = "<style>\n.a { color: {{c}}; }\n</style>\n<p>{{ if a &&\nb }}x{{end}}</p>";
    format_document(source, &tab_config(), &AssertingReformatter);
}

#[test]
fn test_failing_reformatter_falls_back() {
    let source = "<div>\n{{x}}\n</div>";
    let out = format_document(source, &tab_config(), &FailingReformatter);
    assert_eq!(out, "<div>\n\t{{ x }}\n</div>");
}

#[test]
fn test_lost_placeholder_falls_back() {
    let source = "<div>\n{{x}}\n</div>";
    let out = format_document(source, &tab_config(), &LossyReformatter);
    assert_eq!(out, "<div>\n\t{{ x }}\n</div>");
}

#[test]
fn test_duplicated_placeholder_falls_back() {
    let source = "<div>\n{{x}}\n</div>";
    let out = format_document(source, &tab_config(), &DuplicatingReformatter);
    assert_eq!(out, "<div>\n\t{{ x }}\n</div>");
}

#[test]
fn test_style_block_with_scriban() {
    let source = "<head>\n<style>\n\n   body { color: {{color}}; }\n\n</style>\n</head>";
    let out = format_document(source, &tab_config(), &PassthroughReformatter);
    assert_eq!(
        out,
        "<head>\n\t<style>\n\t\tbody { color: {{ color }}; }\n\t</style>\n</head>"
    );
}

#[test]
fn test_plain_style_block_keeps_blank_lines() {
    let source = "<style>\n\n.a { color: red; }\n</style>";
    let out = format_document(source, &tab_config(), &PassthroughReformatter);
    assert_eq!(out, "<style>\n\n\t.a { color: red; }\n</style>");
}

#[test]
fn test_source_containing_token_text() {
    let source = "<p>__SCRIBAN_TAG_0__ {{x}}</p>";
    let out = format_document(source, &tab_config(), &PassthroughReformatter);
    assert_eq!(out, "<p>__SCRIBAN_TAG_0__ {{ x }}</p>");
}

#[test]
fn test_multiline_tag_through_pipeline() {
    let source = "<div>\n{{ if a &&\nb }}\n<p>x</p>\n{{ end }}\n</div>";
    let out = format_document(source, &tab_config(), &PassthroughReformatter);
    assert_eq!(
        out,
        "<div>\n\t{{ if a &&\n\t\t\tb }}\n\t\t<p>x</p>\n\t{{ end }}\n</div>"
    );
}

#[test]
fn test_line_count_preserved() {
    let source = "<div>\n\n{{x}}\n\n\n</div>\n";
    let out = format_document(source, &tab_config(), &PassthroughReformatter);
    assert_eq!(out.split('\n').count(), source.split('\n').count());
    assert_eq!(out, "<div>\n\n\t{{ x }}\n\n\n</div>\n");
}

#[test]
fn test_spaces_indent_unit() {
    let config = Config {
        indent: 4,
        use_tabs: false,
        ..Config::default()
    };
    let out = format_document("<ul>\n<li>a</li>\n</ul>", &config, &PassthroughReformatter);
    assert_eq!(out, "<ul>\n    <li>a</li>\n</ul>");
}

#[test]
fn test_default_indent_is_two_tabs() {
    let out = format_document("<ul>\n<li>a</li>\n</ul>", &Config::default(), &PassthroughReformatter);
    assert_eq!(out, "<ul>\n\t\t<li>a</li>\n</ul>");
}

#[test]
fn test_forced_line_endings() {
    let lf_source = "<div>\n<p>a</p>\n</div>\n";
    let crlf = Config {
        line_ending: LineEnding::Crlf,
        ..tab_config()
    };
    assert_eq!(
        format_document(lf_source, &crlf, &PassthroughReformatter),
        "<div>\r\n\t<p>a</p>\r\n</div>\r\n"
    );

    let lf = Config {
        line_ending: LineEnding::Lf,
        ..tab_config()
    };
    assert_eq!(
        format_document("<div>\r\n<p>a</p>\r\n</div>", &lf, &PassthroughReformatter),
        "<div>\n\t<p>a</p>\n</div>"
    );
}

#[test]
fn test_empty_document() {
    assert_eq!(format_document("", &tab_config(), &PassthroughReformatter), "");
    assert!(format_edit("", &tab_config(), &PassthroughReformatter).is_none());
}

#[test]
fn test_unbalanced_closers_clamp_at_zero() {
    let source = "</div>\n</div>\n{{ end }}\n<p>a</p>";
    let out = format_document(source, &tab_config(), &PassthroughReformatter);
    assert_eq!(out, "</div>\n</div>\n{{ end }}\n<p>a</p>");
}

#[test]
fn test_directive_overrides_config() {
    let source = "<!-- scriban-indent: --indent 3 --spaces -->\n<div>\n{{x}}\n</div>";
    let mut config = tab_config();
    find_directive(&mut BufReader::new(Cursor::new(source)))
        .expect("directive present")
        .apply(&mut config);
    let out = format_document(source, &config, &PassthroughReformatter);
    assert_eq!(
        out,
        "<!-- scriban-indent: --indent 3 --spaces -->\n<div>\n   {{ x }}\n</div>"
    );
}

#[test]
fn test_format_file_roundtrip() {
    let config = Config {
        impose_markup: false,
        ..tab_config()
    };
    let mut output = Vec::new();
    format_file(
        BufReader::new(Cursor::new(PAGE.as_bytes())),
        &mut output,
        &config,
        "test.html",
    )
    .unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), PAGE_FORMATTED);
}

#[test]
fn test_indenter_reused_across_lines() {
    let mut indenter = ScribanIndenter::new("\t");
    assert_eq!(indenter.process_line("{{ for x in y }}"), "{{ for x in y }}");
    assert_eq!(indenter.process_line("{{x}}"), "\t{{ x }}");
    assert_eq!(indenter.state().level, 1);
    assert_eq!(indenter.process_line("{{end}}"), "{{ end }}");
    assert_eq!(indenter.state().level, 0);
}

#[test]
fn test_apply_indentation_standalone() {
    assert_eq!(
        apply_indentation("{{capture out}}\r\n<b>x</b>\r\n{{end}}", "  "),
        "{{ capture out }}\n  <b>x</b>\n{{ end }}"
    );
}

// ============================================================================
// markup_fmt backend
// ============================================================================

/// Lines made of a single template tag, with their indentation
fn tag_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            trimmed.starts_with("{{") && trimmed.ends_with("}}")
        })
        .collect()
}

fn assert_one_tag_per_line(text: &str) {
    for line in text.lines() {
        assert!(line.matches("{{").count() <= 1, "tags merged onto one line: {line:?}");
    }
}

const NESTED_BLOCKS: &str = "<div>\n{{ if a }}\n{{ for x in y }}\n<p>x</p>\n{{ end }}\n{{ end }}\n</div>\n";

#[test]
fn test_markup_fmt_keeps_consecutive_closers_apart() {
    let out = format_document(NESTED_BLOCKS, &tab_config(), &MarkupFmtReformatter);
    assert_one_tag_per_line(&out);
    assert_eq!(
        tag_lines(&out),
        vec!["\t{{ if a }}", "\t\t{{ for x in y }}", "\t\t{{ end }}", "\t{{ end }}"]
    );
    assert!(out.lines().any(|line| line == "\t\t\t<p>x</p>"), "{out}");
}

#[test]
fn test_markup_fmt_keeps_case_branches_aligned() {
    let source = "<div>
{{ case x }}
{{ when \"a\" }}
<p>a</p>
{{ when \"b\" }}
<p>b</p>
{{ end }}
{{ capture f }}
<p>c</p>
{{ end }}
</div>
";
    let out = format_document(source, &tab_config(), &MarkupFmtReformatter);
    assert_one_tag_per_line(&out);
    assert_eq!(
        tag_lines(&out),
        vec![
            "\t{{ case x }}",
            "\t{{ when \"a\" }}",
            "\t{{ when \"b\" }}",
            "\t{{ end }}",
            "\t{{ capture f }}",
            "\t{{ end }}",
        ]
    );
}

#[test]
fn test_markup_fmt_output_is_stable() {
    let once = format_document(NESTED_BLOCKS, &tab_config(), &MarkupFmtReformatter);
    let twice = format_document(&once, &tab_config(), &MarkupFmtReformatter);
    assert_eq!(once, twice);
    assert!(format_edit(&once, &tab_config(), &MarkupFmtReformatter).is_none());
}

#[test]
fn test_markup_fmt_keeps_inline_tags_inline() {
    let source = "<ul>\n<li class=\"{{ cls }}\">{{ name }}</li>\n</ul>\n";
    let out = format_document(source, &tab_config(), &MarkupFmtReformatter);
    assert!(
        out.lines().any(|line| line == "\t<li class=\"{{ cls }}\">{{ name }}</li>"),
        "{out}"
    );
}
