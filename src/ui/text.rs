//! Text wrapping utilities for row and form rendering
//!
//! Widths are measured in terminal cells with `unicode-width`, so wide
//! characters take two columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap `text` into lines no wider than `max_width` cells.
///
/// Breaks at whitespace where possible; words wider than the line are split
/// by character. Explicit newlines start a new line. Always returns at least
/// one (possibly empty) line.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= max_width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            // Word doesn't fit on any line - break it by character
            for c in word.chars() {
                let c_width = c.width().unwrap_or(1);
                if current_width + c_width > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += c_width;
            }
        }
        lines.push(current);
    }
    lines
}

/// Cut `text` to at most `max_width` cells, ending in an ellipsis if cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let c_width = c.width().unwrap_or(1);
        if width + c_width > max_width - 1 {
            break;
        }
        out.push(c);
        width += c_width;
    }
    out.push('…');
    out
}
