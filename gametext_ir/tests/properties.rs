use gametext_ir::{Entry, parse_entries, render_entries};
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = (String, String)> {
    let identifier = prop::string::string_regex("[A-Za-z0-9_]{1,12}").expect("valid regex");
    let text = prop::string::string_regex("[A-Za-z0-9<>{}()\\[\\] ,.!?]{0,30}")
        .expect("valid regex")
        .prop_map(|text| text.trim().to_string());
    (identifier, text)
}

proptest! {
    #[test]
    fn rendered_entries_reparse_to_same_list(raw in prop::collection::vec(entry_strategy(), 0..20)) {
        let entries = raw
            .iter()
            .enumerate()
            .map(|(idx, (identifier, text))| Entry {
                identifier: identifier.clone(),
                text: text.clone(),
                source_line: idx * 2 + 1,
            })
            .collect::<Vec<_>>();

        let rendered = render_entries(&entries, "SelfId=", "Text=");
        let doc = parse_entries(&rendered);

        prop_assert_eq!(doc.entries, entries);
    }

    #[test]
    fn parsing_never_panics_and_lines_are_counted(input in "[ -~\n]{0,200}") {
        let doc = parse_entries(&input);
        prop_assert_eq!(doc.metadata.line_count, gametext_ir::split_lines(&input).len());
        for entry in &doc.entries {
            prop_assert!(entry.source_line >= 1);
            prop_assert!(entry.source_line <= doc.metadata.line_count);
        }
    }
}
