use gametext_ir::{Dialect, EntryDocument, LineKind};

/// Copy an original entry's text into the translated text.
///
/// The first text-marker line after the last matching translated identifier
/// line is rewritten; scanning stops at the next identifier line, so an entry
/// without a text line is left untouched. When the original declares the identifier
/// more than once, the last declaration is used. Returns `None` when the
/// identifier does not exist in the original document.
pub fn restore_entry_text<D: Dialect>(
    translated_text: &str,
    original: &EntryDocument,
    identifier: &str,
    dialect: &D,
) -> Option<String> {
    let source = original
        .entries
        .iter()
        .rev()
        .find(|entry| entry.identifier == identifier)?;

    let id_line = format!("{}{}", dialect.identifier_marker(), identifier);
    let mut lines = translated_text.split('\n').map(str::to_string).collect::<Vec<_>>();
    // Last declaration, the one keyed comparison reads.
    let Some(start) = lines.iter().rposition(|line| line.trim() == id_line) else {
        return Some(translated_text.to_string());
    };

    for line in lines.iter_mut().skip(start + 1) {
        match dialect.classify(line) {
            LineKind::Text => {
                let ending = if line.ends_with('\r') { "\r" } else { "" };
                *line = format!("{}{}{ending}", dialect.text_marker(), source.text);
                break;
            }
            LineKind::Identifier => break,
            _ => {}
        }
    }

    Some(lines.join("\n"))
}

/// Replace one 0-based line of `text`, padding with empty lines when the
/// index is past the end.
pub fn replace_line(text: &str, index: usize, line: &str) -> String {
    let mut lines = text.split('\n').collect::<Vec<_>>();
    if index >= lines.len() {
        lines.resize(index + 1, "");
    }
    lines[index] = line;
    lines.join("\n")
}
