use crate::engine::{diff_chars, diff_chars_bounded};
use crate::error::CompareError;
use crate::model::{
    ChangedLine, CompareOptions, LineComparison, LineRecord, LineStats, LineStatus,
    NavigationKind, NavigationMode,
};
use crate::multiset::compare_tags;
use crate::tokens::extract_tokens;

/// Text-level status of one positional pair.
pub fn line_status(original: &str, translated: &str) -> LineStatus {
    match (original.is_empty(), translated.is_empty()) {
        (false, true) => LineStatus::Removed,
        (true, false) => LineStatus::Added,
        _ if original != translated => LineStatus::Modified,
        _ => LineStatus::Same,
    }
}

/// Compare two texts line by line, by position.
///
/// Lines are split on `\n`; the shorter side is padded with empty lines.
/// Modified pairs get a character diff; tags are compared on every pair.
pub fn compare_lines(
    original: &str,
    translated: &str,
    options: &CompareOptions,
) -> Result<LineComparison, CompareError> {
    let orig_lines = original.split('\n').collect::<Vec<_>>();
    let trans_lines = translated.split('\n').collect::<Vec<_>>();
    let max_len = orig_lines.len().max(trans_lines.len());

    let mut lines = Vec::with_capacity(max_len);
    let mut changed_lines = Vec::new();
    let mut stats = LineStats::default();

    for index in 0..max_len {
        let orig = orig_lines.get(index).copied().unwrap_or("");
        let trans = trans_lines.get(index).copied().unwrap_or("");

        let status = line_status(orig, trans);
        let tag_report = compare_tags(&extract_tokens(orig), &extract_tokens(trans));
        let char_diff = if status == LineStatus::Modified {
            Some(match options.max_diff_cells {
                Some(limit) => diff_chars_bounded(orig, trans, limit)?,
                None => diff_chars(orig, trans),
            })
        } else {
            None
        };

        match status {
            LineStatus::Same => stats.same += 1,
            LineStatus::Added => stats.added += 1,
            LineStatus::Removed => stats.removed += 1,
            LineStatus::Modified => stats.modified += 1,
        }
        if tag_report.is_some() {
            stats.tag_mismatches += 1;
        }

        let record = LineRecord {
            line_number: index + 1,
            original: orig.to_string(),
            translated: trans.to_string(),
            status,
            tag_report,
            char_diff,
        };
        if let Some(kind) = navigation_kind(&record, options.navigation) {
            changed_lines.push(ChangedLine {
                line_number: record.line_number,
                index,
                kind,
                status: record.status,
                tag_report: record.tag_report.clone(),
            });
        }
        lines.push(record);
    }

    Ok(LineComparison {
        navigation: options.navigation,
        lines,
        changed_lines,
        stats,
    })
}

fn navigation_kind(record: &LineRecord, mode: NavigationMode) -> Option<NavigationKind> {
    match mode {
        NavigationMode::TagMismatches => record
            .tag_report
            .is_some()
            .then_some(NavigationKind::TagMismatch),
        NavigationMode::TextChanges => {
            (record.status != LineStatus::Same).then_some(NavigationKind::TextChange)
        }
    }
}
