//! Line text normalization.
//!
//! A line is a single row on the client, so embedded line breaks are folded
//! into spaces. When a maximum display width is configured, text is cut at
//! a grapheme boundary so that wide characters are never split.

use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Normalize `text` for a single stack slot.
pub fn normalize(text: String, max_width: Option<usize>) -> String {
    let text = if text.contains(['\n', '\r']) {
        text.replace("\r\n", " ").replace(['\n', '\r'], " ")
    } else {
        text
    };

    match max_width {
        Some(max) => match clamp_width(&text, max) {
            Cow::Borrowed(_) => text,
            Cow::Owned(clamped) => clamped,
        },
        None => text,
    }
}

/// Truncate `text` to at most `max` display columns.
pub fn clamp_width(text: &str, max: usize) -> Cow<'_, str> {
    if text.width() <= max {
        return Cow::Borrowed(text);
    }

    let mut used = 0;
    let mut end = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let width = grapheme.width();
        if used + width > max {
            break;
        }
        used += width;
        end = offset + grapheme.len();
    }
    Cow::Owned(text[..end].to_owned())
}
