//! Translation consistency checks over marker-format game text.
//!
//! This crate compares an original text against its translation and reports
//! structural drift (missing or extra entries, changed tag and variable
//! counts, dropped game control tags) alongside text-level changes.
//!
//! Primary entrypoints:
//! - [`compare`]
//! - [`check`]
//! - [`compare_lines`]
//! - [`format_markdown_report`]
//!
//! # Example
//!
//! ```rust
//! use gametext_diff::{CompareOptions, ComparisonInput, IssueKind, compare};
//!
//! let original = "SelfId=greet\nText=Hello <KEY_WAIT>\n";
//! let translated = "SelfId=greet\nText=Xin chao\n";
//! let outcome = compare(
//!     &ComparisonInput::new(original, translated),
//!     &CompareOptions::default(),
//! );
//! let report = outcome.report().expect("comparison completes");
//! assert_eq!(report.issues_of(IssueKind::GameTag).count(), 1);
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};

use gametext_ir::parse_entries_with_dialect;

mod align;
mod cache;
mod engine;
mod error;
mod findings;
mod keyed;
mod model;
mod multiset;
mod normalize;
mod report;
mod restore;
mod tokens;
mod util;
mod validate;

pub use align::{compare_lines, line_status};
pub use cache::{ComparisonCache, cache_key};
pub use engine::{diff_chars, diff_chars_bounded};
pub use error::CompareError;
pub use keyed::compare_entries;
pub use model::{
    ChangedLine, CharDiff, CheckMode, Change, CompareOptions, ComparisonInput, CountChange,
    DEFAULT_GAME_TAGS, DiffSpan, ExtractedTokens, FindingLevel, Issue, IssueKind, LineComparison,
    LineRecord, LineStats, LineStatus, NavigationKind, NavigationMode, Outcome, Report,
    SpanStatus, TagReport, TagSignature, TokenClass,
};
pub use multiset::{compare_tags, compare_token_sets};
pub use report::{describe_tag_report, format_issue_log, format_line_report, format_markdown_report};
pub use restore::{replace_line, restore_entry_text};
pub use tokens::{
    GameTagMatcher, extract_class, extract_game_tags, extract_tag_signatures, extract_tokens,
};
pub use validate::{FULL_TEXT_BLOCK, validate_blocks, validate_pairs};

/// Compare two marker-format texts, matching entries by identifier.
///
/// Never fails outright: component errors and panics become
/// [`Outcome::Failed`].
pub fn compare(input: &ComparisonInput<'_>, options: &CompareOptions) -> Outcome {
    check(input, CheckMode::Keyed, options)
}

/// Run one whole-file check in the given mode.
pub fn check(input: &ComparisonInput<'_>, mode: CheckMode, options: &CompareOptions) -> Outcome {
    let result = guarded(|| match mode {
        CheckMode::Keyed => {
            let original = parse_entries_with_dialect(input.original, &options.dialect);
            let translated = parse_entries_with_dialect(input.translated, &options.dialect);
            compare_entries(&original.entries, &translated.entries, options)
        }
        CheckMode::Pairs => validate_pairs(input.original, input.translated, options),
        CheckMode::Blocks => validate_blocks(input.original, input.translated, options),
    });

    match result {
        Ok(report) => {
            tracing::debug!(
                ?mode,
                issues = report.issues.len(),
                changes = report.changes.len(),
                total_original = report.total_original,
                total_translated = report.total_translated,
                "comparison completed"
            );
            Outcome::Completed(report)
        }
        Err(err) => {
            tracing::warn!(?mode, error = %err, "comparison failed");
            Outcome::Failed {
                error: err.to_string(),
            }
        }
    }
}

/// Run `f`, turning a panic into [`CompareError::Internal`].
fn guarded<T>(f: impl FnOnce() -> Result<T, CompareError>) -> Result<T, CompareError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|msg| msg.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(CompareError::Internal(message))
        }
    }
}
