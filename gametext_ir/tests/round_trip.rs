use gametext_ir::{DialectHint, MarkerDialect, parse_entries, parse_entries_with_dialect};

#[test]
fn render_reproduces_canonical_marker_file() {
    let input = "SelfId=1\nText=Hello {name}\nSelfId=2\nText=<b>Hi</b>\n";

    let doc = parse_entries(input);
    assert_eq!(doc.render(), input);
    assert_eq!(doc.metadata.line_count, 4);
}

#[test]
fn render_fills_in_missing_text_lines() {
    let input = "SelfId=1\nSelfId=2\nText=two";

    let doc = parse_entries(input);
    assert_eq!(doc.render(), "SelfId=1\nText=\nSelfId=2\nText=two\n");

    let reparsed = parse_entries(&doc.render());
    assert_eq!(reparsed.entries[0].text, "");
    assert_eq!(reparsed.entries[1].text, "two");
}

#[test]
fn render_uses_custom_markers() {
    let dialect = MarkerDialect {
        name: "csv-ish".to_string(),
        identifier_marker: "ID:".to_string(),
        text_marker: "TX:".to_string(),
        block_key_prefix: "Blk_".to_string(),
    };
    let input = "ID:a\nTX:alpha\n";

    let doc = parse_entries_with_dialect(input, &dialect);
    assert_eq!(doc.render(), input);
    assert_eq!(
        doc.metadata.dialect_hint,
        DialectHint::Named("csv-ish".to_string())
    );
}

#[test]
fn crlf_input_parses_without_carriage_returns() {
    let input = "SelfId=1\r\nText=Hello\r\n";

    let doc = parse_entries(input);
    assert_eq!(doc.entries[0].identifier, "1");
    assert_eq!(doc.entries[0].text, "Hello");
}

#[test]
fn metadata_sets_game_dialect_hint() {
    let doc = parse_entries("SelfId=1\n");
    assert_eq!(doc.metadata.dialect_hint, DialectHint::Game);
    assert_eq!(doc.metadata.identifier_marker, "SelfId=");
    assert_eq!(doc.metadata.text_marker, "Text=");
}
