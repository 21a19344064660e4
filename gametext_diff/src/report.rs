use crate::model::{Issue, LineComparison, NavigationKind, Outcome, TagReport};

/// One-line summary of a tag report: `Tags OK` or `missing: … | extra: …`.
pub fn describe_tag_report(report: Option<&TagReport>) -> String {
    let Some(report) = report else {
        return "Tags OK".to_string();
    };

    let mut parts = Vec::new();
    if !report.missing.is_empty() {
        parts.push(format!("missing: {}", report.missing.join(", ")));
    }
    if !report.extra.is_empty() {
        parts.push(format!("extra: {}", report.extra.join(", ")));
    }

    if parts.is_empty() {
        "Tags OK".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Format a markdown-oriented human report from a check outcome.
pub fn format_markdown_report(outcome: &Outcome, left_label: &str, right_label: &str) -> String {
    let mut out = String::new();
    out.push_str("# Translation Check Report\n\n");
    out.push_str(&format!("- Original: `{left_label}`\n"));
    out.push_str(&format!("- Translated: `{right_label}`\n\n"));

    let report = match outcome {
        Outcome::Completed(report) => report,
        Outcome::Failed { error } => {
            out.push_str("## Error\n\n");
            out.push_str(&format!("{error}\n"));
            return out;
        }
    };

    out.push_str("## Summary\n\n");
    out.push_str(&format!(
        "- Entries: {} -> {}\n",
        report.total_original, report.total_translated
    ));
    out.push_str(&format!("- Issues: {}\n", report.issues.len()));
    out.push_str(&format!("- Changed entries: {}\n\n", report.changes.len()));

    out.push_str("## Issues\n\n");
    if report.issues.is_empty() {
        out.push_str("No issues detected.\n");
    } else {
        for (idx, issue) in report.issues.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", idx + 1, describe_issue(issue)));
        }
    }

    if !report.changes.is_empty() {
        out.push_str("\n## Changes\n\n");
        for change in &report.changes {
            out.push_str(&format!(
                "- `{}`: {:?} -> {:?}\n",
                change.identifier, change.original, change.translated
            ));
        }
    }

    out
}

/// Format the navigation list of a line comparison as markdown.
pub fn format_line_report(comparison: &LineComparison, left_label: &str, right_label: &str) -> String {
    let mut out = String::new();
    out.push_str("# Line Comparison Report\n\n");
    out.push_str(&format!("- Original: `{left_label}`\n"));
    out.push_str(&format!("- Translated: `{right_label}`\n\n"));

    let stats = &comparison.stats;
    out.push_str("## Stats\n\n");
    out.push_str(&format!("- Lines: {}\n", comparison.lines.len()));
    out.push_str(&format!(
        "- Same: {}, Added: {}, Removed: {}, Modified: {}\n",
        stats.same, stats.added, stats.removed, stats.modified
    ));
    out.push_str(&format!("- Tag mismatches: {}\n\n", stats.tag_mismatches));

    out.push_str("## Lines\n\n");
    if comparison.changed_lines.is_empty() {
        out.push_str("Nothing to review.\n");
        return out;
    }

    for changed in &comparison.changed_lines {
        let detail = match changed.kind {
            NavigationKind::TagMismatch => describe_tag_report(changed.tag_report.as_ref()),
            NavigationKind::TextChange => format!("{:?}", changed.status).to_lowercase(),
        };
        out.push_str(&format!("- Line {}: {detail}\n", changed.line_number));
    }

    out
}

/// Numbered plain-text issue log, or an all-clear line when empty.
pub fn format_issue_log(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "OK! No missing lines, tags or variables detected.".to_string();
    }

    let mut out = String::from("=== TRANSLATION ISSUE LOG ===\n\n");
    for (idx, issue) in issues.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, issue.message));
    }
    out.push_str(&format!("\n=== TOTAL: {} ISSUE(S) ===", issues.len()));
    out
}

fn describe_issue(issue: &Issue) -> String {
    let mut text = format!("{:?} [{}]", issue.level, issue.kind.code());
    if !issue.identifier.is_empty() {
        text.push_str(&format!(" `{}`", issue.identifier));
    }
    text.push_str(&format!(": {}", issue.message));
    if let Some(line) = issue.line {
        text.push_str(&format!(" (line {line})"));
    }
    if let Some(tokens) = &issue.tokens {
        text.push_str(&format!(" [{}]", describe_tag_report(Some(tokens))));
    }
    text
}
