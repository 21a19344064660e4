use gametext_ir::{BlockLine, parse_blocks_with_dialect, parse_pairs};

use crate::error::CompareError;
use crate::findings::collect_count_findings;
use crate::model::{Change, CompareOptions, Issue, IssueKind, Report};
use crate::multiset::compare_tags;
use crate::report::describe_tag_report;
use crate::tokens::{GameTagMatcher, extract_tag_signatures, extract_tokens};
use crate::util::snippet;

/// Block name used when neither text declares a block key.
pub const FULL_TEXT_BLOCK: &str = "(full text)";

/// Validate two key-value-pair files position by position.
pub fn validate_pairs(
    original: &str,
    translated: &str,
    options: &CompareOptions,
) -> Result<Report, CompareError> {
    let game_tags = GameTagMatcher::new(&options.game_tags)?;
    let orig = parse_pairs(original);
    let trans = parse_pairs(translated);

    let mut issues = Vec::new();
    let mut changes = Vec::new();

    if orig.non_blank_lines != trans.non_blank_lines {
        issues.push(
            Issue::warning(
                IssueKind::LineCountMismatch,
                "",
                format!(
                    "non-blank line count changed: {} -> {}",
                    orig.non_blank_lines, trans.non_blank_lines
                ),
            )
            .with_counts(orig.non_blank_lines, trans.non_blank_lines),
        );
    }

    let max_len = orig.pairs.len().max(trans.pairs.len());
    for idx in 0..max_len {
        match (orig.pairs.get(idx), trans.pairs.get(idx)) {
            (Some(o), Some(t)) => {
                let lines = (Some(o.source_line), Some(t.source_line));
                if o.identifier != t.identifier {
                    issues.push(
                        Issue::warning(
                            IssueKind::IdentifierChanged,
                            &o.identifier,
                            format!(
                                "identifier changed from \"{}\" to \"{}\"",
                                o.identifier, t.identifier
                            ),
                        )
                        .at_lines(lines.0, lines.1),
                    );
                }

                match (o.text.is_empty(), t.text.is_empty()) {
                    (false, true) => issues.push(
                        Issue::warning(
                            IssueKind::ContentMissing,
                            &o.identifier,
                            "translated value is empty but the original has content".to_string(),
                        )
                        .at_lines(lines.0, lines.1),
                    ),
                    (true, false) => issues.push(
                        Issue::warning(
                            IssueKind::ContentUnexpected,
                            &o.identifier,
                            "translated value has content but the original is empty".to_string(),
                        )
                        .at_lines(lines.0, lines.1),
                    ),
                    _ => collect_count_findings(
                        &o.identifier,
                        lines,
                        &o.text,
                        &t.text,
                        &game_tags,
                        &mut issues,
                    ),
                }

                if o.text != t.text {
                    changes.push(Change {
                        identifier: o.identifier.clone(),
                        original: o.text.clone(),
                        translated: t.text.clone(),
                        line: Some(o.source_line),
                    });
                }
            }
            (Some(o), None) => issues.push(
                Issue::warning(
                    IssueKind::Missing,
                    &o.identifier,
                    format!(
                        "pair \"{}\" has no counterpart in the translation",
                        o.identifier
                    ),
                )
                .at_lines(Some(o.source_line), None),
            ),
            (None, Some(t)) => issues.push(
                Issue::warning(
                    IssueKind::Extra,
                    &t.identifier,
                    format!(
                        "pair \"{}\" has no counterpart in the original",
                        t.identifier
                    ),
                )
                .at_lines(None, Some(t.source_line)),
            ),
            (None, None) => {}
        }
    }

    Ok(Report {
        issues,
        changes,
        total_original: orig.pairs.len(),
        total_translated: trans.pairs.len(),
    })
}

/// Validate two keyed-block files line by line within each block.
///
/// Trailing newlines are ignored. When neither text declares a block key,
/// all lines are compared as a single block.
pub fn validate_blocks(
    original: &str,
    translated: &str,
    options: &CompareOptions,
) -> Result<Report, CompareError> {
    let orig = parse_blocks_with_dialect(original.trim_end_matches(['\n', '\r']), &options.dialect);
    let trans =
        parse_blocks_with_dialect(translated.trim_end_matches(['\n', '\r']), &options.dialect);

    let mut out = BlockFindings::default();

    if !orig.has_keys() && !trans.has_keys() {
        out.compare_block(FULL_TEXT_BLOCK, &orig.preamble, &trans.preamble);
        return Ok(out.into_report(orig.preamble.len(), trans.preamble.len()));
    }

    for block in &orig.blocks {
        if trans.block(&block.key).is_none() {
            out.issues.push(
                Issue::warning(
                    IssueKind::Missing,
                    &block.key,
                    format!("block key {} is missing from the translation", block.key),
                )
                .at_lines(Some(block.span.line), None),
            );
        }
    }
    for block in &trans.blocks {
        if orig.block(&block.key).is_none() {
            out.issues.push(
                Issue::warning(
                    IssueKind::Extra,
                    &block.key,
                    format!("block key {} is not in the original", block.key),
                )
                .at_lines(None, Some(block.span.line)),
            );
        }
    }

    for block in &orig.blocks {
        if let Some(other) = trans.block(&block.key) {
            out.compare_block(&block.key, &block.lines, &other.lines);
        }
    }

    Ok(out.into_report(orig.blocks.len(), trans.blocks.len()))
}

#[derive(Debug, Default)]
struct BlockFindings {
    issues: Vec<Issue>,
    changes: Vec<Change>,
}

impl BlockFindings {
    fn into_report(self, total_original: usize, total_translated: usize) -> Report {
        Report {
            issues: self.issues,
            changes: self.changes,
            total_original,
            total_translated,
        }
    }

    fn compare_block(&mut self, key: &str, orig: &[BlockLine], trans: &[BlockLine]) {
        if orig.len() != trans.len() {
            let message = if orig.len() > trans.len() {
                format!(
                    "[{key}] translation is missing {} line(s) (original: {}, translated: {})",
                    orig.len() - trans.len(),
                    orig.len(),
                    trans.len()
                )
            } else {
                format!(
                    "[{key}] translation has {} extra line(s) (original: {}, translated: {})",
                    trans.len() - orig.len(),
                    orig.len(),
                    trans.len()
                )
            };
            self.issues.push(
                Issue::warning(IssueKind::LineCountMismatch, key, message)
                    .with_counts(orig.len(), trans.len()),
            );
        }

        // Extra translated lines are covered by the count finding above.
        for (idx, o) in orig.iter().enumerate() {
            let block_line = idx + 1;
            let Some(t) = trans.get(idx) else {
                self.issues.push(
                    Issue::warning(
                        IssueKind::ContentMissing,
                        key,
                        format!(
                            "[{key}, line {block_line}] translated line is missing; original: {}",
                            snippet(o.text.trim(), 60)
                        ),
                    )
                    .at_lines(Some(o.line), None),
                );
                continue;
            };

            let o_text = o.text.trim();
            let t_text = t.text.trim();
            let lines = (Some(o.line), Some(t.line));

            if !o_text.is_empty() && t_text.is_empty() {
                self.issues.push(
                    Issue::warning(
                        IssueKind::ContentMissing,
                        key,
                        format!(
                            "[{key}, line {block_line}] translated line is empty but the original has content"
                        ),
                    )
                    .at_lines(lines.0, lines.1),
                );
                continue;
            }

            let report = compare_tags(&extract_tokens(o_text), &extract_tokens(t_text));
            if report.is_some() {
                self.issues.push(
                    Issue::warning(
                        IssueKind::TagMismatch,
                        key,
                        format!(
                            "[{key}, line {block_line}] {}",
                            describe_tag_report(report.as_ref())
                        ),
                    )
                    .at_lines(lines.0, lines.1)
                    .with_tokens(report),
                );
            }

            self.collect_param_drift(key, block_line, lines, o_text, t_text);

            if o_text != t_text {
                self.changes.push(Change {
                    identifier: format!("{key}:{block_line}"),
                    original: o_text.to_string(),
                    translated: t_text.to_string(),
                    line: Some(o.line),
                });
            }
        }
    }

    /// Same tag written with a different number of parameters.
    fn collect_param_drift(
        &mut self,
        key: &str,
        block_line: usize,
        lines: (Option<usize>, Option<usize>),
        original: &str,
        translated: &str,
    ) {
        let orig_sigs = extract_tag_signatures(original);
        let trans_sigs = extract_tag_signatures(translated);

        let mut reported: Vec<&str> = Vec::new();
        for sig in &orig_sigs {
            if reported.contains(&sig.name.as_str()) {
                continue;
            }
            let orig_counts = orig_sigs
                .iter()
                .filter(|other| other.name == sig.name)
                .map(|other| other.param_count);
            let trans_counts = trans_sigs
                .iter()
                .filter(|other| other.name == sig.name)
                .map(|other| other.param_count)
                .collect::<Vec<_>>();

            let drift = orig_counts
                .zip(trans_counts.iter().copied())
                .find(|(o, t)| o != t);
            if let Some((o, t)) = drift {
                reported.push(sig.name.as_str());
                self.issues.push(
                    Issue::warning(
                        IssueKind::TagParamCount,
                        key,
                        format!(
                            "[{key}, line {block_line}] tag {}: original has {o} parameter(s), translation has {t}",
                            sig.name
                        ),
                    )
                    .at_lines(lines.0, lines.1)
                    .with_counts(o, t),
                );
            }
        }
    }
}
