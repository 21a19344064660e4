use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*?\)").expect("valid parenthesized segment regex"));

/// Drop every `(...)` segment so parameterized variants compare equal.
pub(crate) fn strip_parenthesized(token: &str) -> String {
    PARENTHESIZED.replace_all(token, "").into_owned()
}

/// Tag name: content before the first `(`, trimmed.
pub(crate) fn tag_name(inner: &str) -> &str {
    match inner.split_once('(') {
        Some((name, _)) => name.trim(),
        None => inner.trim(),
    }
}

/// Number of non-blank comma-separated parameters between the first `(` and
/// the last `)`.
pub(crate) fn param_count(inner: &str) -> usize {
    let (Some(open), Some(close)) = (inner.find('('), inner.rfind(')')) else {
        return 0;
    };
    if close <= open {
        return 0;
    }
    inner[open + 1..close]
        .split(',')
        .filter(|param| !param.trim().is_empty())
        .count()
}
