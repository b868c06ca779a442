//! Unicode utilities for laying out menu lines.
//!
//! Every line the menu writes is measured in terminal columns, not bytes or
//! chars. Content wider than the terminal is cut at a grapheme boundary; it
//! is never wrapped.

mod width;

pub use width::{WidthMethod, display_width, set_width_method, width_method};

use unicode_segmentation::UnicodeSegmentation;

/// Return the longest prefix of `s` that fits in `max_cols` columns.
///
/// Cuts only at grapheme boundaries, so a wide character that would straddle
/// the limit is dropped whole.
#[must_use]
pub fn truncate_to_width(s: &str, max_cols: usize) -> &str {
    let mut used = 0usize;
    for (offset, grapheme) in s.grapheme_indices(true) {
        let w = display_width(grapheme);
        if used + w > max_cols {
            return &s[..offset];
        }
        used += w;
    }
    s
}

/// Truncate `s` to `cols` columns and pad it with spaces to exactly `cols`.
///
/// Lines produced this way overwrite whatever a previous, longer line left
/// on the same terminal row.
#[must_use]
pub fn fit_to_width(s: &str, cols: usize) -> String {
    let cut = truncate_to_width(s, cols);
    let used = display_width(cut);
    let mut out = String::with_capacity(cut.len() + cols.saturating_sub(used));
    out.push_str(cut);
    out.extend(std::iter::repeat_n(' ', cols.saturating_sub(used)));
    out
}

/// Left padding that puts content of `content_cols` columns in the middle of
/// `cols` columns.
///
/// Matches how menu lines are centered: half the line width minus half the
/// content width, each rounded down, floored at zero.
#[must_use]
pub fn center_offset(cols: usize, content_cols: usize) -> usize {
    (cols / 2).saturating_sub(content_cols / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================
    // Truncation
    // ============================================

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Settings", 4), "Sett");
        assert_eq!(truncate_to_width("Settings", 8), "Settings");
        assert_eq!(truncate_to_width("Settings", 100), "Settings");
        assert_eq!(truncate_to_width("Settings", 0), "");
    }

    #[test]
    fn test_truncate_never_splits_wide_char() {
        // Each CJK char is two columns; three columns fit only one
        assert_eq!(truncate_to_width("設定画面", 3), "設");
        assert_eq!(truncate_to_width("設定画面", 4), "設定");
    }

    #[test]
    fn test_truncate_keeps_combining_sequence_together() {
        assert_eq!(truncate_to_width("e\u{0301}x", 1), "e\u{0301}");
    }

    // ============================================
    // Fitting
    // ============================================

    #[test]
    fn test_fit_pads_short_content() {
        assert_eq!(fit_to_width("ab", 5), "ab   ");
    }

    #[test]
    fn test_fit_cuts_long_content() {
        assert_eq!(fit_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn test_fit_pads_after_wide_cut() {
        let fitted = fit_to_width("設定", 3);
        assert_eq!(fitted, "設 ");
        assert_eq!(display_width(&fitted), 3);
    }

    // ============================================
    // Centering
    // ============================================

    #[test]
    fn test_center_offset() {
        assert_eq!(center_offset(80, 4), 38);
        assert_eq!(center_offset(20, 5), 8);
        assert_eq!(center_offset(4, 10), 0);
    }
}
