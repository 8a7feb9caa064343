use core_render::clip::{clip_rows, display_width, truncate_to_width};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    // ASCII, CJK, combining marks and newlines
    proptest::collection::vec(
        prop_oneof![
            Just("a"),
            Just("Z"),
            Just(" "),
            Just("日"),
            Just("語"),
            Just("e\u{0301}"),
            Just("\n"),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn truncation_is_a_fitting_prefix(s in text(), max in 0usize..30) {
        let line = s.replace('\n', "");
        let cut = truncate_to_width(&line, max);
        prop_assert!(line.starts_with(cut));
        prop_assert!(display_width(cut) <= max);
        if display_width(&line) <= max {
            prop_assert_eq!(cut, line.as_str());
        }
    }

    #[test]
    fn clipped_rows_have_exact_count(s in text(), rows in 1usize..5, max in 0usize..20) {
        let out = clip_rows(&s, rows, max);
        prop_assert_eq!(out.len(), rows);
        for row in &out {
            prop_assert!(display_width(row) <= max);
            prop_assert!(!row.contains('\n'));
        }
    }
}
