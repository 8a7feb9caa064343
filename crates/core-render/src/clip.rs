//! Display-width aware clipping. Rows are truncated on grapheme cluster
//! boundaries and never wrapped.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal columns occupied by `s`.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Longest prefix of `s` whose display width fits in `max_columns`.
///
/// A wide cluster that would straddle the limit is dropped whole.
pub fn truncate_to_width(s: &str, max_columns: usize) -> &str {
    let mut used = 0usize;
    for (start, g) in s.grapheme_indices(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > max_columns {
            return &s[..start];
        }
        used += w;
    }
    s
}

/// Shape `text` into exactly `rows` lines of at most `max_columns` each.
///
/// Extra lines are dropped, missing lines are padded with empty rows.
pub fn clip_rows(text: &str, rows: usize, max_columns: usize) -> Vec<String> {
    let mut out: Vec<String> = text
        .split('\n')
        .take(rows)
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            truncate_to_width(line, max_columns).to_string()
        })
        .collect();
    out.resize(rows, String::new());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_truncates_at_column_limit() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("abc", 10), "abc");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn wide_cluster_never_split() {
        // each CJK ideograph occupies two columns
        assert_eq!(display_width("日本語"), 6);
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("日本語", 1), "");
    }

    #[test]
    fn combining_mark_stays_with_base() {
        let s = "e\u{0301}xyz";
        assert_eq!(truncate_to_width(s, 1), "e\u{0301}");
    }

    #[test]
    fn rows_are_clipped_and_padded() {
        assert_eq!(clip_rows("one\ntwo\nthree", 2, 10), vec!["one", "two"]);
        assert_eq!(clip_rows("one", 3, 10), vec!["one", "", ""]);
        assert_eq!(clip_rows("one\r\ntwo", 2, 2), vec!["on", "tw"]);
    }
}
