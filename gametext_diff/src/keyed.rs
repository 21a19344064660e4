use gametext_ir::Entry;

use crate::error::CompareError;
use crate::findings::{
    EntryIndex, collect_count_findings, collect_duplicate_findings, collect_identifier_findings,
};
use crate::model::{Change, CompareOptions, Report};
use crate::tokens::GameTagMatcher;

/// Compare two entry lists matched by identifier.
///
/// Issue order: missing identifiers, extra identifiers, duplicate
/// diagnostics (when enabled), then per-entry count findings in original
/// order. Changes list every shared identifier whose text differs.
pub fn compare_entries(
    original: &[Entry],
    translated: &[Entry],
    options: &CompareOptions,
) -> Result<Report, CompareError> {
    let game_tags = GameTagMatcher::new(&options.game_tags)?;
    let orig_index = EntryIndex::build(original);
    let trans_index = EntryIndex::build(translated);

    let mut issues = Vec::new();
    let mut changes = Vec::new();

    collect_identifier_findings(&orig_index, &trans_index, &mut issues);
    if options.flag_duplicate_identifiers {
        collect_duplicate_findings(&orig_index, "original", &mut issues);
        collect_duplicate_findings(&trans_index, "translated", &mut issues);
    }

    for orig in orig_index.iter() {
        let Some(trans) = trans_index.get(&orig.identifier) else {
            continue;
        };

        if orig.text != trans.text {
            changes.push(Change {
                identifier: orig.identifier.clone(),
                original: orig.text.clone(),
                translated: trans.text.clone(),
                line: Some(orig.source_line),
            });
        }

        collect_count_findings(
            &orig.identifier,
            (Some(orig.source_line), Some(trans.source_line)),
            &orig.text,
            &trans.text,
            &game_tags,
            &mut issues,
        );
    }

    Ok(Report {
        issues,
        changes,
        total_original: original.len(),
        total_translated: translated.len(),
    })
}
