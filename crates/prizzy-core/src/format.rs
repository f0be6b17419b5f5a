//! Display formatting for mentor replies.
//!
//! Reply text comes from an external service, so only two things are
//! interpreted: `**bold**` pairs and line breaks. Everything else, markup
//! included, passes through as literal text. Control characters never reach
//! the terminal.

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

/// A run of text within one displayed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Split `text` into lines of plain and bold segments.
///
/// Every `\n` starts a new line. Bold pairs never span lines; an opening
/// `**` without a closing one on the same line stays literal. Tabs become
/// spaces and every other control character is dropped.
pub fn format_message(text: &str) -> Vec<Vec<Segment>> {
    text.split('\n')
        .map(|line| format_line(&strip_controls(line)))
        .collect()
}

fn strip_controls(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        if c == '\t' {
            out.extend(std::iter::repeat(' ').take(TAB_WIDTH));
        } else if !c.is_control() {
            out.push(c);
        }
    }
    out
}

fn format_line(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };

        if open > 0 {
            segments.push(Segment::plain(&rest[..open]));
        }
        // `****` is an empty pair and renders as nothing.
        if close > 0 {
            segments.push(Segment::bold(&after_open[..close]));
        }
        rest = &after_open[close + 2..];
    }

    if !rest.is_empty() {
        segments.push(Segment::plain(rest));
    }
    segments
}
