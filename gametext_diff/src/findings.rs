use std::collections::HashMap;

use gametext_ir::Entry;

use crate::model::{Issue, IssueKind, TokenClass};
use crate::multiset::compare_token_sets;
use crate::tokens::{GameTagMatcher, extract_class};
use crate::util::join_or_none;

/// Entries grouped by identifier: first-occurrence order, last-occurrence value.
#[derive(Debug, Default)]
pub(crate) struct EntryIndex<'a> {
    order: Vec<&'a str>,
    latest: HashMap<&'a str, &'a Entry>,
    counts: HashMap<&'a str, usize>,
}

impl<'a> EntryIndex<'a> {
    pub(crate) fn build(entries: &'a [Entry]) -> Self {
        let mut index = Self::default();
        for entry in entries {
            let id = entry.identifier.as_str();
            let count = index.counts.entry(id).or_insert(0);
            if *count == 0 {
                index.order.push(id);
            }
            *count += 1;
            index.latest.insert(id, entry);
        }
        index
    }

    pub(crate) fn get(&self, identifier: &str) -> Option<&'a Entry> {
        self.latest.get(identifier).copied()
    }

    pub(crate) fn contains(&self, identifier: &str) -> bool {
        self.latest.contains_key(identifier)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &'a Entry> + '_ {
        self.order.iter().filter_map(|id| self.get(id))
    }

    fn duplicates(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.order.iter().filter_map(|id| {
            let count = self.counts.get(id).copied().unwrap_or(0);
            (count > 1).then_some((*id, count))
        })
    }
}

/// Identifiers present on only one side.
pub(crate) fn collect_identifier_findings(
    original: &EntryIndex<'_>,
    translated: &EntryIndex<'_>,
    out: &mut Vec<Issue>,
) {
    for entry in original.iter() {
        if !translated.contains(&entry.identifier) {
            out.push(
                Issue::warning(
                    IssueKind::Missing,
                    &entry.identifier,
                    format!(
                        "identifier \"{}\" is missing from the translation",
                        entry.identifier
                    ),
                )
                .at_lines(Some(entry.source_line), None),
            );
        }
    }

    for entry in translated.iter() {
        if !original.contains(&entry.identifier) {
            out.push(
                Issue::warning(
                    IssueKind::Extra,
                    &entry.identifier,
                    format!(
                        "identifier \"{}\" was added in the translation (not in the original)",
                        entry.identifier
                    ),
                )
                .at_lines(None, Some(entry.source_line)),
            );
        }
    }
}

/// Identifiers declared more than once; the last declaration is the one compared.
pub(crate) fn collect_duplicate_findings(index: &EntryIndex<'_>, side: &str, out: &mut Vec<Issue>) {
    for (id, count) in index.duplicates() {
        let line = index.get(id).map(|entry| entry.source_line);
        let issue = Issue::info(
            IssueKind::DuplicateIdentifier,
            id,
            format!(
                "identifier \"{id}\" appears {count}x in the {side} file; the last occurrence is compared"
            ),
        );
        out.push(if side == "original" {
            issue.at_lines(line, None)
        } else {
            issue.at_lines(None, line)
        });
    }
}

/// Angle-tag, variable and game-tag count checks for one text pair.
///
/// Only counts are compared here: a renamed variable or a swapped game tag
/// with the same count raises nothing. The attached `TagReport` names the
/// differing tokens when a count does change.
pub(crate) fn collect_count_findings(
    identifier: &str,
    lines: (Option<usize>, Option<usize>),
    original: &str,
    translated: &str,
    game_tags: &GameTagMatcher,
    out: &mut Vec<Issue>,
) {
    let (line, translated_line) = lines;

    let orig_tags = extract_class(original, TokenClass::Angle);
    let trans_tags = extract_class(translated, TokenClass::Angle);
    if orig_tags.len() != trans_tags.len() {
        out.push(
            Issue::warning(
                IssueKind::TagCount,
                identifier,
                format!(
                    "tag count changed: {} -> {}",
                    orig_tags.len(),
                    trans_tags.len()
                ),
            )
            .at_lines(line, translated_line)
            .with_counts(orig_tags.len(), trans_tags.len())
            .with_tokens(compare_token_sets(&orig_tags, &trans_tags)),
        );
    }

    let orig_vars = extract_class(original, TokenClass::Curly);
    let trans_vars = extract_class(translated, TokenClass::Curly);
    if orig_vars.len() != trans_vars.len() {
        out.push(
            Issue::warning(
                IssueKind::VariableCount,
                identifier,
                format!(
                    "variable count changed: {} -> {}",
                    orig_vars.len(),
                    trans_vars.len()
                ),
            )
            .at_lines(line, translated_line)
            .with_counts(orig_vars.len(), trans_vars.len())
            .with_tokens(compare_token_sets(&orig_vars, &trans_vars)),
        );
    }

    let orig_game = game_tags.extract(original);
    let trans_game = game_tags.extract(translated);
    if orig_game.len() != trans_game.len() {
        out.push(
            Issue::warning(
                IssueKind::GameTag,
                identifier,
                format!("game tags changed: {}", join_or_none(&orig_game)),
            )
            .at_lines(line, translated_line)
            .with_counts(orig_game.len(), trans_game.len())
            .with_tokens(compare_token_sets(&orig_game, &trans_game)),
        );
    }
}
