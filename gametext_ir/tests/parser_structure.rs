use gametext_ir::{LineKind, parse_blocks, parse_entries, parse_pairs, split_lines};

#[test]
fn captures_identifier_text_and_source_line() {
    let input = "[Header]\n\nSelfId=intro_001\nSpeaker=Narrator\nText=Hello {name}\n";

    let doc = parse_entries(input);
    assert_eq!(doc.entries.len(), 1);
    assert_eq!(doc.entries[0].identifier, "intro_001");
    assert_eq!(doc.entries[0].text, "Hello {name}");
    assert_eq!(doc.entries[0].source_line, 3);
}

#[test]
fn next_identifier_stops_text_scan_without_being_consumed() {
    let input = "SelfId=1\nSelfId=2\nText=two\n";

    let doc = parse_entries(input);
    assert_eq!(doc.entries.len(), 2);
    assert_eq!(doc.entries[0].text, "");
    assert_eq!(doc.entries[1].identifier, "2");
    assert_eq!(doc.entries[1].text, "two");
    assert_eq!(doc.entries[1].source_line, 2);
}

#[test]
fn trailing_identifier_gets_empty_text() {
    let doc = parse_entries("SelfId=1\nText=one\nSelfId=2");
    assert_eq!(doc.entries.len(), 2);
    assert_eq!(doc.entries[1].text, "");
}

#[test]
fn empty_input_yields_no_entries() {
    let doc = parse_entries("");
    assert!(doc.entries.is_empty());
    assert_eq!(doc.metadata.line_count, 0);
}

#[test]
fn indented_markers_are_recognized() {
    let doc = parse_entries("   SelfId=7  \n\tText=  padded  \n");
    assert_eq!(doc.entries[0].identifier, "7");
    assert_eq!(doc.entries[0].text, "  padded");
}

#[test]
fn records_findings_for_duplicates_and_orphan_text() {
    let input = "Text=stray\nSelfId=1\nText=a\nText=b\nSelfId=1\nText=c\n";
    let doc = parse_entries(input);

    let codes = doc
        .metadata
        .parse_findings
        .iter()
        .map(|f| (f.code.as_str(), f.span.line))
        .collect::<Vec<_>>();
    assert_eq!(
        codes,
        vec![
            ("orphan-text-marker", 1),
            ("orphan-text-marker", 4),
            ("duplicate-identifier", 5),
        ]
    );
    assert_eq!(doc.entries.len(), 2);
}

#[test]
fn split_lines_keeps_endings_and_spans() {
    let lines = split_lines("a\r\nbc\nd");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].raw, "a");
    assert_eq!(lines[0].line_ending, "\r\n");
    assert_eq!(lines[1].span.start_byte, 3);
    assert_eq!(lines[1].span.end_byte, 5);
    assert_eq!(lines[2].line_ending, "");
}

#[test]
fn pairs_skip_blank_lines_and_alternate() {
    let doc = parse_pairs("greeting\n\nHello {name}\n  farewell \nBye\n");

    assert_eq!(doc.non_blank_lines, 4);
    assert!(!doc.dangling);
    assert_eq!(doc.pairs.len(), 2);
    assert_eq!(doc.pairs[0].identifier, "greeting");
    assert_eq!(doc.pairs[0].text, "Hello {name}");
    assert_eq!(doc.pairs[1].identifier, "farewell");
    assert_eq!(doc.pairs[1].source_line, 4);
}

#[test]
fn pairs_flag_dangling_identifier() {
    let doc = parse_pairs("a\n1\nb\n");

    assert!(doc.dangling);
    assert_eq!(doc.pairs.len(), 2);
    assert_eq!(doc.pairs[1].text, "");
    assert_eq!(doc.metadata.parse_findings[0].code, "dangling-identifier");
}

#[test]
fn blocks_group_lines_under_keys() {
    let input = "preface\nTxt_Intro\nline one\n\nline two\nTxt_Outro\nbye\n";
    let doc = parse_blocks(input);

    assert_eq!(doc.preamble.len(), 1);
    assert_eq!(doc.blocks.len(), 2);

    let intro = doc.block("Txt_Intro").expect("intro block");
    assert_eq!(intro.span.line, 2);
    assert_eq!(
        intro.lines.iter().map(|l| l.line).collect::<Vec<_>>(),
        vec![3, 4, 5]
    );
    assert_eq!(doc.block("Txt_Outro").expect("outro").lines[0].text, "bye");
}

#[test]
fn repeated_block_key_restarts_block_in_place() {
    let doc = parse_blocks("Txt_A\nold\nTxt_B\nb\nTxt_A\nnew\n");

    assert_eq!(doc.blocks[0].key, "Txt_A");
    assert_eq!(doc.blocks[0].lines.len(), 1);
    assert_eq!(doc.blocks[0].lines[0].text, "new");
    assert_eq!(doc.metadata.parse_findings[0].code, "duplicate-block-key");
}

#[test]
fn game_dialect_classifies_lines() {
    use gametext_ir::{Dialect, GameDialect};

    let dialect = GameDialect;
    assert_eq!(dialect.classify("  "), LineKind::Blank);
    assert_eq!(dialect.classify("SelfId=1"), LineKind::Identifier);
    assert_eq!(dialect.classify(" Text=x"), LineKind::Text);
    assert_eq!(dialect.classify("Txt_Intro"), LineKind::BlockKey);
    assert_eq!(dialect.classify("Speaker=Bob"), LineKind::Content);
}
