/// `ScribanIndenter` - Line-by-line indentation of mixed HTML/Scriban text
///
/// Two nesting structures are merged into one depth: HTML elements and
/// Scriban blocks. Both are reduced to per-line counts and combined by
/// addition, so their order within a line does not matter. The only state
/// carried between lines lives in [`IndentState`].
use tracing::trace;

use super::keywords::{analyze_segments, SegmentCounts};
use super::spacing::normalize_tag_spacing;
use crate::parser::markup::{analyze_markup_line, MarkupCounts};
use crate::parser::patterns::CLOSING_ONLY_RE;
use crate::parser::segments::extract_segments;

/// State carried from one line to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentState {
    /// Running depth for the next line
    pub level: usize,
    /// A Scriban tag opened on an earlier line is still unterminated
    pub in_tag: bool,
    /// Depth of each line that opened a still-unterminated multi-line tag
    ///
    /// Popped by a closing-only line (`}}`, `~}}`), which renders at that
    /// depth. A tag ending on a line with other content also pops its entry,
    /// so stale depths never reach a later closing-only line.
    pub block_open_indents: Vec<usize>,
}

/// A rendered line and the depth it was rendered at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedLine {
    /// Number of indent units prepended
    pub depth: usize,
    /// Trimmed, tag-normalized content (without indentation)
    pub content: String,
}

/// Check whether a trimmed line only ends a multi-line tag (`}}`, `~}}`, `- }}`)
#[must_use]
pub fn is_closing_only(line: &str) -> bool {
    CLOSING_ONLY_RE.is_match(line)
}

/// Compute the depth of one line and advance `state`
///
/// Returns `None` for blank lines, which leave the state untouched.
#[must_use]
pub fn indent_line(line: &str, state: &mut IndentState) -> Option<IndentedLine> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let content = normalize_tag_spacing(trimmed).into_owned();

    let was_in_tag = state.in_tag;
    let scan = extract_segments(&content, &mut state.in_tag);
    let keywords: SegmentCounts = analyze_segments(&scan.segments);
    let markup: MarkupCounts = analyze_markup_line(&scan.markup);

    // Closers, middles and leading closing tags describe this line's own depth.
    // Whatever the clamp at zero swallows is still owed by the next line.
    let dedent = keywords.dedent_before() + markup.leading_closings;
    let deficit = dedent.saturating_sub(state.level);
    state.level -= dedent - deficit;

    let closing_only = is_closing_only(&content);
    let tag_offset = usize::from(was_in_tag && !closing_only);
    let depth = if closing_only {
        state
            .block_open_indents
            .pop()
            .unwrap_or(state.level + tag_offset)
    } else {
        state.level + tag_offset
    };

    if !was_in_tag && state.in_tag {
        state.block_open_indents.push(depth);
    } else if was_in_tag && !state.in_tag && !closing_only {
        // Tag ended on a line with other content; its opener entry is done
        state.block_open_indents.pop();
    }

    state.level = (state.level + keywords.indent_after() + markup.opening_tags)
        .saturating_sub(markup.remaining_closings() + deficit);

    trace!(
        depth,
        next_level = state.level,
        in_tag = state.in_tag,
        ?keywords,
        ?markup,
        "indented line"
    );

    Some(IndentedLine { depth, content })
}

/// Indenter that renders lines with a fixed indent unit
pub struct ScribanIndenter {
    /// Literal text of one indent level
    indent_unit: String,
    state: IndentState,
}

impl ScribanIndenter {
    /// Create an indenter starting at depth zero
    #[must_use]
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            indent_unit: indent_unit.into(),
            state: IndentState::default(),
        }
    }

    /// Current carried state
    #[must_use]
    pub fn state(&self) -> &IndentState {
        &self.state
    }

    /// Render one line; blank lines come back empty
    pub fn process_line(&mut self, line: &str) -> String {
        match indent_line(line, &mut self.state) {
            Some(indented) => self.indent_unit.repeat(indented.depth) + &indented.content,
            None => String::new(),
        }
    }

    /// Render every line of `lines`
    pub fn process_lines<'a, I>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines.into_iter().map(|line| self.process_line(line)).collect()
    }
}

/// Indent a whole text, joining the result with `\n`
#[must_use]
pub fn apply_indentation(text: &str, indent_unit: &str) -> String {
    let mut indenter = ScribanIndenter::new(indent_unit);
    indenter
        .process_lines(text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)))
        .join("\n")
}
