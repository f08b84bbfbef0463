//! Cell-level layout helpers: wrapping, truncation and placement.

use ratatui::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Word-wrap `text` into lines of at most `width` cells.
///
/// Words wider than a line are split at grapheme boundaries.
#[must_use]
pub fn wrap_words(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for grapheme in word.graphemes(true) {
            let g_width = grapheme.width();
            if current_width + g_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push_str(grapheme);
            current_width += g_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut `label` to at most `width` cells, on grapheme boundaries.
#[must_use]
pub fn fit_label(label: &str, width: u16) -> String {
    let width = usize::from(width);
    if label.width() <= width {
        return label.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for grapheme in label.graphemes(true) {
        let g_width = grapheme.width();
        if used + g_width > width {
            break;
        }
        out.push_str(grapheme);
        used += g_width;
    }
    out
}

/// Cell width of a string.
#[must_use]
pub fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// A `width` x `height` rectangle centered horizontally in `area` at row `y`.
#[must_use]
pub fn centered_at(area: Rect, y: u16, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, y, width, height)
}

/// Shift (and if needed shrink) `rect` so it lies fully inside `bounds`.
#[must_use]
pub fn clamp_into(rect: Rect, bounds: Rect) -> Rect {
    let width = rect.width.min(bounds.width);
    let height = rect.height.min(bounds.height);
    let max_x = bounds.right().saturating_sub(width);
    let max_y = bounds.bottom().saturating_sub(height);
    let x = rect.x.clamp(bounds.x, max_x.max(bounds.x));
    let y = rect.y.clamp(bounds.y, max_y.max(bounds.y));
    Rect::new(x, y, width, height)
}
