// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Sanitizers applied to every user-controlled value before it is
//! interpolated into a rendered document.
//!
//! Text is stripped of control characters, truncated and escaped so it can
//! neither break out of markup attributes nor inflate the output. Numbers are
//! clamped so that hostile counts cannot produce degenerate canvas sizes.

use std::borrow::Cow;

/// Maximum number of characters retained by [`sanitize_text`].
pub const MAX_TEXT_LENGTH: usize = 200;

/// Upper bound applied by [`sanitize_number`].
pub const MAX_NUMBER: u32 = 9000;

/// Returns a markup-safe rendition of `value`.
///
/// Control characters are removed, the remainder is truncated to
/// [`MAX_TEXT_LENGTH`] characters and the five markup-significant characters
/// are replaced by entities. Truncation happens before escaping so entities
/// are never split.
///
/// # Examples
///
/// ```
/// use contrib::sanitize_text;
///
/// assert_eq!(sanitize_text("<script>"), "&lt;script&gt;");
/// assert_eq!(sanitize_text(&"a".repeat(300)).len(), 200);
/// ```
pub fn sanitize_text(value: &str) -> String {
    let visible: String = value
        .chars()
        .filter(|character| !character.is_control())
        .take(MAX_TEXT_LENGTH)
        .collect();

    escape_markup(&visible).into_owned()
}

/// Returns `value` prepared for a Markdown code span.
///
/// Code spans render their content literally and never decode entities, so
/// escaping would show through as `&amp;`. Control characters are removed,
/// the text is truncated to [`MAX_TEXT_LENGTH`] characters and backticks,
/// the only character able to close the span, become apostrophes.
///
/// # Examples
///
/// ```
/// use contrib::sanitize_code_span;
///
/// assert_eq!(sanitize_code_span("R&D"), "R&D");
/// assert_eq!(sanitize_code_span("a`b"), "a'b");
/// ```
pub fn sanitize_code_span(value: &str) -> String {
    value
        .chars()
        .filter(|character| !character.is_control())
        .take(MAX_TEXT_LENGTH)
        .map(|character| if character == '`' { '\'' } else { character })
        .collect()
}

/// Coerces `value` into a non-negative integer no larger than [`MAX_NUMBER`].
///
/// Negative input floors to zero. Values that do not fit into an `i64` are
/// treated as oversized and clamp to the maximum.
///
/// # Examples
///
/// ```
/// use contrib::sanitize_number;
///
/// assert_eq!(sanitize_number(-5), 0);
/// assert_eq!(sanitize_number(999_999), 9000);
/// assert_eq!(sanitize_number(42_u64), 42);
/// ```
pub fn sanitize_number<N>(value: N) -> u32
where
    N: TryInto<i64>
{
    match value.try_into() {
        Ok(number) => number.clamp(0, i64::from(MAX_NUMBER)) as u32,
        Err(_) => MAX_NUMBER
    }
}

/// Escapes markup-significant characters without truncating.
///
/// Used for values that are produced by the crate itself, such as avatar
/// data URIs, which legitimately exceed [`MAX_TEXT_LENGTH`].
pub(crate) fn escape_markup(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len() + 16);
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}
