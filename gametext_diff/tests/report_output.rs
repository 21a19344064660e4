use gametext_diff::{
    CompareOptions, ComparisonInput, Outcome, TagReport, compare, compare_lines,
    describe_tag_report, format_issue_log, format_line_report, format_markdown_report,
};

#[test]
fn markdown_report_lists_issues_and_changes() {
    let outcome = compare(
        &ComparisonInput::new("SelfId=1\nText=<b>Hi</b>\n", "SelfId=1\nText=<b>Chao\n"),
        &CompareOptions::default(),
    );
    let report = format_markdown_report(&outcome, "en.txt", "vi.txt");

    assert!(report.contains("# Translation Check Report"));
    assert!(report.contains("- Original: `en.txt`"));
    assert!(report.contains("- Entries: 1 -> 1"));
    assert!(report.contains("- Issues: 1"));
    assert!(report.contains("1. Warning [tag_count] `1`: tag count changed: 2 -> 1 (line 1) [missing: </b>]"));
    assert!(report.contains("## Changes"));
}

#[test]
fn markdown_report_shows_error_only() {
    let outcome = Outcome::Failed {
        error: "internal comparison failure: boom".to_string(),
    };
    let report = format_markdown_report(&outcome, "a", "b");
    assert!(report.contains("## Error"));
    assert!(report.contains("boom"));
    assert!(!report.contains("## Summary"));
}

#[test]
fn line_report_lists_navigation_entries() {
    let comparison = compare_lines("Hi <b>\nsame", "Chao\nsame", &CompareOptions::default())
        .expect("comparison completes");
    let report = format_line_report(&comparison, "en.txt", "vi.txt");

    assert!(report.contains("# Line Comparison Report"));
    assert!(report.contains("- Tag mismatches: 1"));
    assert!(report.contains("- Line 1: missing: <b>"));
}

#[test]
fn tag_report_summary() {
    assert_eq!(describe_tag_report(None), "Tags OK");
    let report = TagReport {
        missing: vec!["<b>".to_string()],
        extra: vec!["{x} x2".to_string()],
        mismatch_counts: false,
    };
    assert_eq!(describe_tag_report(Some(&report)), "missing: <b> | extra: {x} x2");
}

#[test]
fn issue_log_is_numbered_with_total() {
    let outcome = compare(
        &ComparisonInput::new("SelfId=1\nText=a\nSelfId=2\nText=b\n", "SelfId=3\nText=c\n"),
        &CompareOptions::default(),
    );
    let issues = &outcome.report().expect("comparison completes").issues;
    let log = format_issue_log(issues);

    assert!(log.starts_with("=== TRANSLATION ISSUE LOG ==="));
    assert!(log.contains("1. identifier \"1\" is missing from the translation"));
    assert!(log.contains("3. identifier \"3\" was added in the translation"));
    assert!(log.ends_with("=== TOTAL: 3 ISSUE(S) ==="));
    assert_eq!(
        format_issue_log(&[]),
        "OK! No missing lines, tags or variables detected."
    );
}
