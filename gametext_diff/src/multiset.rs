use std::collections::HashMap;

use crate::model::{ExtractedTokens, TagReport, TokenClass};
use crate::util::count_label;

/// Token counts that remember first-occurrence order.
#[derive(Debug, Default)]
struct Multiset<'a> {
    order: Vec<&'a str>,
    counts: HashMap<&'a str, usize>,
}

impl<'a> Multiset<'a> {
    fn from_tokens(tokens: &'a [String]) -> Self {
        let mut set = Self::default();
        for token in tokens {
            let count = set.counts.entry(token.as_str()).or_insert(0);
            if *count == 0 {
                set.order.push(token.as_str());
            }
            *count += 1;
        }
        set
    }

    fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.order.iter().map(|token| (*token, self.count(token)))
    }
}

/// Compare two token lists as multisets.
///
/// Returns `None` when both sides hold the same tokens with the same counts.
/// A token absent on the other side is listed with its full count; a token
/// present on both sides with a different count is listed with the
/// difference and sets [`TagReport::mismatch_counts`]. Counts of one are not
/// annotated.
pub fn compare_token_sets(original: &[String], translated: &[String]) -> Option<TagReport> {
    let orig = Multiset::from_tokens(original);
    let trans = Multiset::from_tokens(translated);

    let mut missing = Vec::new();
    let mut extra = Vec::new();
    let mut mismatch_counts = false;

    for (token, o) in orig.iter() {
        let t = trans.count(token);
        if t == 0 {
            missing.push(count_label(token, o));
        } else if t < o {
            mismatch_counts = true;
            missing.push(count_label(token, o - t));
        }
    }

    for (token, t) in trans.iter() {
        let o = orig.count(token);
        if o == 0 {
            extra.push(count_label(token, t));
        } else if t > o {
            mismatch_counts = true;
            extra.push(count_label(token, t - o));
        }
    }

    if missing.is_empty() && extra.is_empty() && !mismatch_counts {
        return None;
    }

    Some(TagReport {
        missing,
        extra,
        mismatch_counts,
    })
}

/// Compare all three token classes and merge the per-class reports.
///
/// Classes are merged in angle, curly, square order.
pub fn compare_tags(original: &ExtractedTokens, translated: &ExtractedTokens) -> Option<TagReport> {
    let mut merged = TagReport::default();

    for class in TokenClass::ALL {
        if let Some(report) = compare_token_sets(original.class(class), translated.class(class)) {
            merged.missing.extend(report.missing);
            merged.extra.extend(report.extra);
            merged.mismatch_counts |= report.mismatch_counts;
        }
    }

    if merged.missing.is_empty() && merged.extra.is_empty() {
        None
    } else {
        Some(merged)
    }
}
