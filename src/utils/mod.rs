//! Utility helpers shared by the render layer

use unicode_width::UnicodeWidthChar;

/// Clamp `s` to at most `max_cols` terminal columns, appending an
/// ellipsis when anything was cut. Width-aware so wide characters
/// (CJK, emoji) never overflow the column budget.
pub fn ellipsize(s: &str, max_cols: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_cols {
        return s.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }

    let budget = max_cols - 1; // reserve one column for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Longest suffix of `s` that fits in `max_cols` terminal columns.
/// Used to keep the cursor end of a long input value visible.
pub fn tail_cols(s: &str, max_cols: usize) -> &str {
    let mut used = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_cols {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}
