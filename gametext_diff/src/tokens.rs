use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CompareError;
use crate::model::{ExtractedTokens, TagSignature, TokenClass};
use crate::normalize::{param_count, strip_parenthesized, tag_name};

// Game tags never nest a literal closing delimiter, so a negated class is enough.
static ANGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^>]+)>").expect("valid angle regex"));
static CURLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]+\}").expect("valid curly regex"));
static SQUARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]+\]").expect("valid square regex"));

fn pattern(class: TokenClass) -> &'static Regex {
    match class {
        TokenClass::Angle => &ANGLE,
        TokenClass::Curly => &CURLY,
        TokenClass::Square => &SQUARE,
    }
}

/// Extract normalized tokens of one class, left to right.
pub fn extract_class(text: &str, class: TokenClass) -> Vec<String> {
    pattern(class)
        .find_iter(text)
        .map(|m| strip_parenthesized(m.as_str()))
        .collect()
}

/// Extract all three token classes independently.
///
/// A curly region inside an angle region is still reported as a curly token.
pub fn extract_tokens(text: &str) -> ExtractedTokens {
    ExtractedTokens {
        angle: extract_class(text, TokenClass::Angle),
        curly: extract_class(text, TokenClass::Curly),
        square: extract_class(text, TokenClass::Square),
    }
}

/// Name and parameter count of every angle tag, left to right.
pub fn extract_tag_signatures(text: &str) -> Vec<TagSignature> {
    ANGLE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|inner| TagSignature {
            name: tag_name(inner.as_str()).to_string(),
            param_count: param_count(inner.as_str()),
        })
        .collect()
}

/// Matcher for the configured game control tags (`<KEY_WAIT>` and friends).
#[derive(Debug, Clone)]
pub struct GameTagMatcher {
    pattern: Option<Regex>,
}

impl GameTagMatcher {
    /// Build a matcher for exact `<name>` occurrences of the given names.
    pub fn new(names: &[String]) -> Result<Self, CompareError> {
        if names.is_empty() {
            return Ok(Self { pattern: None });
        }
        let alternatives = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("<(?:{alternatives})>"))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Game tags present in `text`, left to right, with delimiters.
    pub fn extract(&self, text: &str) -> Vec<String> {
        match &self.pattern {
            Some(pattern) => pattern
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Game tags in `text` for the given names.
pub fn extract_game_tags(text: &str, names: &[String]) -> Result<Vec<String>, CompareError> {
    Ok(GameTagMatcher::new(names)?.extract(text))
}
