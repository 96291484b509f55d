//! A centralized module for user-facing formatting utilities.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Formats a score for display: whole numbers without decimals,
/// everything else with one decimal place.
pub fn format_score(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

/// Cuts `s` to at most `max` display columns, ending in '…' when cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_owned();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max - 1 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pads `s` with spaces on the right to `width` display columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores() {
        assert_eq!(format_score(144.0), "144");
        assert_eq!(format_score(12.5), "12.5");
        assert_eq!(format_score(0.333), "0.3");
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_to_width("Dark Mode", 20), "Dark Mode");
        assert_eq!(truncate_to_width("One-Click Checkout", 6), "One-C…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_to_width("日本", 6), "日本  ");
        assert_eq!(pad_to_width("toolong", 3), "toolong");
    }
}
