//! Pure markdown escaping utilities.
//!
//! Only the characters that would otherwise start emphasis or code spans
//! are escaped, plus a period that would turn the start of a line into an
//! ordered list item.

use std::borrow::Cow;

use memchr::memchr3;

/// Escape special Markdown characters in text.
///
/// Escapes:
/// - Emphasis: `*`, `_`
/// - Code: `` ` ``
/// - Ordered list markers: the period of `digits.` at the start of a line
///   when followed by a space or the end of the line
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use tagdown::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// assert_eq!(escape_markdown("1. not a list"), "1\\. not a list");
/// assert_eq!(escape_markdown("plain [text]"), "plain [text]");
/// ```
pub fn escape_markdown(text: &str) -> Cow<'_, str> {
    escape(text, true)
}

/// Escape emphasis and code characters only.
///
/// For text that ends up in the middle of a paragraph run, where a leading
/// number is not at the start of a line. Line starts produced by wrapping
/// are handled by [`escape_ordinal`].
///
/// ```
/// use tagdown::markdown::escape_inline;
///
/// assert_eq!(escape_inline("1. *x*"), "1. \\*x\\*");
/// ```
pub fn escape_inline(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

fn escape(text: &str, ordinals: bool) -> Cow<'_, str> {
    let has_specials = memchr3(b'*', b'_', b'`', text.as_bytes()).is_some();
    if !has_specials
        && !(ordinals && text.split('\n').any(|line| ordinal_period(line).is_some()))
    {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + text.len() / 10);
    for line in text.split_inclusive('\n') {
        let period = if ordinals { ordinal_period(line) } else { None };
        for (pos, c) in line.char_indices() {
            match c {
                '*' | '_' | '`' => {
                    result.push('\\');
                    result.push(c);
                }
                '.' if Some(pos) == period => result.push_str("\\."),
                _ => result.push(c),
            }
        }
    }

    Cow::Owned(result)
}

/// Escape an ordered-list marker at the start of `line`, if any.
///
/// Used on every line produced by paragraph wrapping, since wrapping can
/// move a number that was mid-sentence to the start of a line.
pub fn escape_ordinal(line: &str) -> Cow<'_, str> {
    match ordinal_period(line) {
        Some(pos) => Cow::Owned(format!("{}\\{}", &line[..pos], &line[pos..])),
        None => Cow::Borrowed(line),
    }
}

/// Byte offset of the period in a leading `digits.` marker.
fn ordinal_period(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || bytes.get(digits) != Some(&b'.') {
        return None;
    }
    match bytes.get(digits + 1) {
        None | Some(b' ' | b'\n') => Some(digits),
        Some(_) => None,
    }
}

/// Calculate the minimum backtick count needed for inline code.
///
/// Returns the smallest number of backticks (at least 1) that doesn't
/// appear as a run in the content.
///
/// # Examples
///
/// ```
/// use tagdown::markdown::calculate_inline_code_ticks;
///
/// // Normal content needs 1 backtick
/// assert_eq!(calculate_inline_code_ticks("code"), 1);
///
/// // Content with backticks needs more
/// assert_eq!(calculate_inline_code_ticks("code with ` backtick"), 2);
/// assert_eq!(calculate_inline_code_ticks("a ` b `` c"), 3);
/// ```
pub fn calculate_inline_code_ticks(content: &str) -> usize {
    let mut runs = Vec::new();
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
        } else if current_run > 0 {
            runs.push(current_run);
            current_run = 0;
        }
    }
    if current_run > 0 {
        runs.push(current_run);
    }

    (1..).find(|n| !runs.contains(n)).unwrap_or(1)
}
