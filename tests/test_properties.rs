//! Property tests for the analysis pipeline.

use pdf_lens::analysis::{extract_keywords, generate_summary, segment, SegmentKind};
use pdf_lens::converters::{format, FormatOptions};
use pdf_lens::layout::parse_table;
use pdf_lens::search::{navigate, replace_all, search, Direction, SearchOptions};
use proptest::prelude::*;

fn prose() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z]{1,9}( [a-zA-Z]{1,9}){2,12}[.!?]", 0..12)
        .prop_map(|sentences| sentences.join(" "))
}

fn single_rule() -> impl Strategy<Value = FormatOptions> {
    (0..7usize).prop_map(|i| {
        let o = FormatOptions::new();
        match i {
            0 => o.with_remove_extra_spaces(true),
            1 => o.with_normalize_line_breaks(true),
            2 => o.with_remove_empty_lines(true),
            3 => o.with_trim_lines(true),
            4 => o.with_capitalize_sentences(true),
            5 => o.with_remove_special_chars(true),
            _ => o.with_format_paragraphs(true),
        }
    })
}

proptest! {
    #[test]
    fn prop_format_single_rule_idempotent(text in "[ -~\t\r\n]{0,80}", options in single_rule()) {
        let once = format(&text, &options);
        prop_assert_eq!(format(&once, &options), once);
    }

    #[test]
    fn prop_table_rows_match_headers(
        rows in prop::collection::vec(prop::collection::vec("[a-z0-9]{1,6}", 1..6), 1..6)
    ) {
        let lines: Vec<String> = rows.iter().map(|r| r.join("  ")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let table = parse_table(&refs);
        prop_assert!(table.rows.iter().all(|r| r.len() == table.headers.len()));
        prop_assert_eq!(table.raw.len(), lines.len());
    }

    #[test]
    fn prop_keywords_bounded_and_sorted(text in prose(), n in 0..15usize) {
        let keywords = extract_keywords(&text, n);
        prop_assert!(keywords.len() <= n);
        prop_assert!(keywords.windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert!(keywords.iter().all(|k| k.score >= 0.0));
    }

    #[test]
    fn prop_summary_bounded(text in prose(), pct in 0..80u32) {
        let result = generate_summary(&text, pct);
        prop_assert!(result.stats.summary_words <= result.stats.original_words);
    }

    #[test]
    fn prop_paragraph_segments_keep_all_text(
        paras in prop::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,5}", 1..6)
    ) {
        let text = paras.join("\n\n");
        let result = segment(&text, SegmentKind::Paragraphs);
        let joined: String = result.segments.iter().map(|s| s.content.as_str()).collect();
        let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        prop_assert_eq!(strip(&joined), strip(&text));
        prop_assert!(result.segments.iter().all(|s| !s.content.is_empty()));
    }

    #[test]
    fn prop_replace_removes_literal_matches(text in "[abc ]{0,40}", word in "[abc]{1,3}") {
        let opts = SearchOptions::new().with_literal(true).with_case_sensitive(true);
        let replaced = replace_all(&text, &word, "#", &opts);
        prop_assert!(search(&replaced, &word, &opts).is_empty());
    }

    #[test]
    fn prop_navigation_stays_in_range(count in 1..50usize, start in 0..50usize, steps in 0..100usize) {
        let mut current = Some(start % count);
        for i in 0..steps {
            let dir = if i % 3 == 0 { Direction::Prev } else { Direction::Next };
            current = navigate(count, current, dir);
            prop_assert!(matches!(current, Some(c) if c < count));
        }
    }
}
