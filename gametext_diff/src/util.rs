/// Token with a repeat annotation, `tok` or `tok xN`.
pub(crate) fn count_label(token: &str, count: usize) -> String {
    if count > 1 {
        format!("{token} x{count}")
    } else {
        token.to_string()
    }
}

/// First `max_chars` characters of `text`, for messages.
pub(crate) fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub(crate) fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
