//! Paragraph formatting: whitespace collapsing and greedy line filling.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use super::escape::escape_ordinal;

/// Narrowest width a nested paragraph is ever wrapped to.
pub const MIN_WIDTH: usize = 20;

/// Marker used inside an inline run for a hard line break.
pub(crate) const HARD_BREAK: char = '\n';

/// Width left after indenting by `by` columns.
pub fn indented(width: usize, by: usize) -> usize {
    width.saturating_sub(by).max(MIN_WIDTH)
}

/// Collapse every run of ASCII whitespace into a single space.
///
/// Non-breaking spaces are left alone.
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let needs_work = bytes.iter().enumerate().any(|(i, b)| {
        b.is_ascii_whitespace()
            && (*b != b' ' || bytes.get(i + 1).is_some_and(u8::is_ascii_whitespace))
    });
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    Cow::Owned(out)
}

/// Reflow an inline run into lines no wider than `width`.
///
/// Words are separated by single spaces and never split; a word wider than
/// `width` gets a line of its own. [`HARD_BREAK`] markers become Markdown
/// hard breaks (two trailing spaces); consecutive breaks collapse into one.
/// Every produced line has a leading ordered-list marker escaped.
///
/// Returns an empty string when the run holds no visible content.
pub fn fill(run: &str, width: usize) -> String {
    let mut segments = Vec::new();
    for segment in run.split(HARD_BREAK) {
        let lines = fill_segment(segment, width);
        if !lines.is_empty() {
            segments.push(lines.join("\n"));
        }
    }
    segments.join("  \n")
}

fn fill_segment(segment: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in segment.split(' ').filter(|w| !w.is_empty()) {
        let word_width = word.width();
        if !line.is_empty() && line_width + 1 + word_width > width {
            lines.push(escape_ordinal(&line).into_owned());
            line.clear();
            line_width = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }

    if !line.is_empty() {
        lines.push(escape_ordinal(&line).into_owned());
    }
    lines
}

/// Prefix the first line of `body` with `first` and the remaining non-empty
/// lines with `rest`. Empty lines stay empty.
pub fn hang(body: &str, first: &str, rest: &str) -> String {
    let mut out = String::with_capacity(body.len() + first.len());
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if i == 0 {
            out.push_str(first);
        } else if !line.is_empty() {
            out.push_str(rest);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\n\tc"), "a b c");
        assert_eq!(collapse_whitespace(" a b "), " a b ");
        assert!(matches!(collapse_whitespace("a b"), Cow::Borrowed(_)));
        assert_eq!(collapse_whitespace("a\u{a0} b"), "a\u{a0} b");
    }

    #[test]
    fn test_fill_short_run() {
        assert_eq!(fill("  Lorem **ipsum**. ", 78), "Lorem **ipsum**.");
        assert_eq!(fill("   ", 78), "");
    }

    #[test]
    fn test_fill_wraps_greedily() {
        let run = "aaaa bbbb cccc dddd eeee ffff gggg";
        assert_eq!(fill(run, 20), "aaaa bbbb cccc dddd\neeee ffff gggg");
    }

    #[test]
    fn test_long_word_kept_whole() {
        let long = "x".repeat(30);
        assert_eq!(fill(&format!("a {long} b"), 20), format!("a\n{long}\nb"));
    }

    #[test]
    fn test_wide_characters_measured_by_columns() {
        // Each CJK character occupies two columns.
        let run = "漢字漢字漢字 漢字漢字漢字 ab";
        assert_eq!(fill(run, 25), "漢字漢字漢字 漢字漢字漢字\nab");
    }

    #[test]
    fn test_hard_breaks() {
        assert_eq!(fill("one\ntwo", 78), "one  \ntwo");
        assert_eq!(fill("one \n\n two\n", 78), "one  \ntwo");
    }

    #[test]
    fn test_wrapped_ordinal_escaped() {
        assert_eq!(
            fill("it happened in the year 1999. Then more", 24),
            "it happened in the year\n1999\\. Then more"
        );
    }

    #[test]
    fn test_hang() {
        assert_eq!(hang("a\n\nb", "  * ", "    "), "  * a\n\n    b");
        assert_eq!(hang("a", "1.  ", "    "), "1.  a");
    }

    #[test]
    fn test_indented_never_below_minimum() {
        assert_eq!(indented(78, 4), 74);
        assert_eq!(indented(22, 4), MIN_WIDTH);
    }
}
