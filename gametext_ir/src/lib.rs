//! Line model and entry parser for key/value game-text files.
//!
//! This crate provides:
//! - a line splitter that keeps spans and line endings (`split_lines`)
//! - marker-mode entry parsing (`parse_entries`, `parse_entries_with_dialect`)
//! - key-value-pair parsing (`parse_pairs`)
//! - keyed-block parsing (`parse_blocks`)
//! - entry rendering back to marker format (`EntryDocument::render`)
//!
//! Parsing never fails. Lines that do not fit the expected shape are kept
//! out of entries and, where useful, recorded as [`ParseFinding`]s.
//!
//! # Example
//!
//! ```rust
//! use gametext_ir::parse_entries;
//!
//! let input = "SelfId=1\nText=Hello {name}\n";
//! let doc = parse_entries(input);
//! assert_eq!(doc.entries.len(), 1);
//! assert_eq!(doc.entries[0].identifier, "1");
//! assert_eq!(doc.render(), input);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Source span pointing to a single line and byte range in the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// Lightweight classification of a raw line under a [`Dialect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Blank,
    Identifier,
    Text,
    BlockKey,
    Content,
}

/// One physical input line with its original line ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    pub raw: String,
    pub line_ending: String,
    pub span: Span,
}

impl SourceLine {
    /// Line content with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }
}

/// One translatable unit: identifier plus its text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub identifier: String,
    pub text: String,
    /// 1-based line where the identifier was found.
    pub source_line: usize,
}

/// Declared file convention used for a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialectHint {
    #[default]
    Game,
    Unknown,
    Named(String),
}

/// Parser-level note attached to a source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFinding {
    pub code: String,
    pub message: String,
    pub span: Span,
}

/// Document metadata attached during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub dialect_hint: DialectHint,
    pub identifier_marker: String,
    pub text_marker: String,
    pub original_bytes: usize,
    pub line_count: usize,
    pub parse_findings: Vec<ParseFinding>,
}

impl DocumentMetadata {
    fn for_input<D: Dialect>(input: &str, dialect: &D) -> Self {
        Self {
            dialect_hint: dialect.dialect_hint(),
            identifier_marker: dialect.identifier_marker().to_string(),
            text_marker: dialect.text_marker().to_string(),
            original_bytes: input.len(),
            line_count: 0,
            parse_findings: Vec::new(),
        }
    }
}

/// Marker-mode parse result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryDocument {
    pub metadata: DocumentMetadata,
    pub entries: Vec<Entry>,
}

impl EntryDocument {
    /// Render entries back to marker format, one identifier line and one text
    /// line per entry.
    ///
    /// Re-parsing the output with the same markers yields the same
    /// identifier/text sequence; source line numbers are renumbered.
    pub fn render(&self) -> String {
        render_entries(
            &self.entries,
            &self.metadata.identifier_marker,
            &self.metadata.text_marker,
        )
    }

    /// First entry with the given identifier.
    pub fn find(&self, identifier: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.identifier == identifier)
    }
}

impl fmt::Display for EntryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Key-value-pair parse result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PairDocument {
    pub metadata: DocumentMetadata,
    pub pairs: Vec<Entry>,
    /// Number of lines left after discarding blank lines.
    pub non_blank_lines: usize,
    /// Set when the last identifier had no value line.
    pub dangling: bool,
}

/// One line inside a keyed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLine {
    /// 1-based source line.
    pub line: usize,
    pub text: String,
}

/// Lines grouped under one block-key line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub key: String,
    pub span: Span,
    pub lines: Vec<BlockLine>,
}

/// Keyed-block parse result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockDocument {
    pub metadata: DocumentMetadata,
    pub blocks: Vec<Block>,
    /// Lines before the first block key.
    pub preamble: Vec<BlockLine>,
}

impl BlockDocument {
    /// Borrow a block by key.
    pub fn block(&self, key: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.key == key)
    }

    /// Whether any block key was found.
    pub fn has_keys(&self) -> bool {
        !self.blocks.is_empty()
    }
}

/// Dialect extension point for the line-prefix markers of a file convention.
pub trait Dialect {
    /// Report a dialect hint to store in [`DocumentMetadata`].
    fn dialect_hint(&self) -> DialectHint {
        DialectHint::Unknown
    }
    /// Prefix of a line carrying an entry identifier.
    fn identifier_marker(&self) -> &str;
    /// Prefix of a line carrying an entry text.
    fn text_marker(&self) -> &str;
    /// Prefix of a line opening a keyed block.
    fn block_key_prefix(&self) -> &str;

    /// Classify a raw line. Markers are matched against the trimmed line.
    fn classify(&self, raw: &str) -> LineKind {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if has_marker(trimmed, self.identifier_marker()) {
            LineKind::Identifier
        } else if has_marker(trimmed, self.text_marker()) {
            LineKind::Text
        } else if has_marker(trimmed, self.block_key_prefix()) {
            LineKind::BlockKey
        } else {
            LineKind::Content
        }
    }
}

/// Built-in convention: `SelfId=` / `Text=` entries and `Txt_` block keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameDialect;

impl Dialect for GameDialect {
    fn dialect_hint(&self) -> DialectHint {
        DialectHint::Game
    }

    fn identifier_marker(&self) -> &str {
        "SelfId="
    }

    fn text_marker(&self) -> &str {
        "Text="
    }

    fn block_key_prefix(&self) -> &str {
        "Txt_"
    }
}

/// Caller-supplied marker prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDialect {
    pub name: String,
    pub identifier_marker: String,
    pub text_marker: String,
    pub block_key_prefix: String,
}

impl Default for MarkerDialect {
    fn default() -> Self {
        let game = GameDialect;
        Self {
            name: "game".to_string(),
            identifier_marker: game.identifier_marker().to_string(),
            text_marker: game.text_marker().to_string(),
            block_key_prefix: game.block_key_prefix().to_string(),
        }
    }
}

impl Dialect for MarkerDialect {
    fn dialect_hint(&self) -> DialectHint {
        if self.name == "game" {
            DialectHint::Game
        } else {
            DialectHint::Named(self.name.clone())
        }
    }

    fn identifier_marker(&self) -> &str {
        &self.identifier_marker
    }

    fn text_marker(&self) -> &str {
        &self.text_marker
    }

    fn block_key_prefix(&self) -> &str {
        &self.block_key_prefix
    }
}

fn has_marker(trimmed: &str, marker: &str) -> bool {
    !marker.is_empty() && trimmed.starts_with(marker)
}

/// Split input into lines, keeping `\n` / `\r\n` endings and byte spans.
///
/// Empty input yields no lines; a trailing newline does not open an extra line.
pub fn split_lines(input: &str) -> Vec<SourceLine> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut line_no = 1usize;

    while start < input.len() {
        let next_lf = input[start..].find('\n').map(|idx| start + idx);
        let (segment, next_start) = if let Some(lf_idx) = next_lf {
            (&input[start..=lf_idx], lf_idx + 1)
        } else {
            (&input[start..], input.len())
        };

        let (raw, line_ending) = split_line_ending(segment);
        out.push(SourceLine {
            raw: raw.to_string(),
            line_ending: line_ending.to_string(),
            // Spans cover the content bytes only (not trailing newline bytes).
            span: Span {
                line: line_no,
                start_byte: start,
                end_byte: start + raw.len(),
            },
        });

        line_no += 1;
        start = next_start;
    }

    out
}

fn split_line_ending(segment: &str) -> (&str, &str) {
    if let Some(raw) = segment.strip_suffix("\r\n") {
        (raw, "\r\n")
    } else if let Some(raw) = segment.strip_suffix('\n') {
        (raw, "\n")
    } else {
        (segment, "")
    }
}

/// Parse marker-format input using the built-in game dialect.
pub fn parse_entries(input: &str) -> EntryDocument {
    parse_entries_with_dialect(input, &GameDialect)
}

/// Parse marker-format input with the given dialect.
///
/// Each identifier line opens an entry. The entry text is the first
/// following text-marker line, unless another identifier line comes first,
/// in which case the text is empty and that identifier line opens the next
/// entry.
pub fn parse_entries_with_dialect<D: Dialect>(input: &str, dialect: &D) -> EntryDocument {
    let mut metadata = DocumentMetadata::for_input(input, dialect);
    let lines = split_lines(input);
    metadata.line_count = lines.len();

    let kinds = lines
        .iter()
        .map(|line| dialect.classify(&line.raw))
        .collect::<Vec<_>>();
    let mut claimed = vec![false; lines.len()];
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for idx in 0..lines.len() {
        let line = &lines[idx];
        match kinds[idx] {
            LineKind::Identifier => {
                let identifier =
                    strip_marker(line.trimmed(), dialect.identifier_marker()).to_string();
                let mut text = String::new();
                for next in idx + 1..lines.len() {
                    match kinds[next] {
                        LineKind::Text => {
                            text = strip_marker(lines[next].trimmed(), dialect.text_marker())
                                .to_string();
                            claimed[next] = true;
                            break;
                        }
                        LineKind::Identifier => break,
                        _ => {}
                    }
                }

                if !seen.insert(identifier.clone()) {
                    metadata.parse_findings.push(ParseFinding {
                        code: "duplicate-identifier".to_string(),
                        message: format!(
                            "identifier `{identifier}` appears more than once; the last occurrence wins"
                        ),
                        span: line.span.clone(),
                    });
                }

                entries.push(Entry {
                    identifier,
                    text,
                    source_line: line.span.line,
                });
            }
            LineKind::Text if !claimed[idx] => {
                metadata.parse_findings.push(ParseFinding {
                    code: "orphan-text-marker".to_string(),
                    message: "text line is not attached to any identifier; line ignored"
                        .to_string(),
                    span: line.span.clone(),
                });
            }
            _ => {}
        }
    }

    EntryDocument { metadata, entries }
}

fn strip_marker<'a>(trimmed: &'a str, marker: &str) -> &'a str {
    trimmed.strip_prefix(marker).unwrap_or(trimmed)
}

/// Render entries in marker format.
pub fn render_entries(entries: &[Entry], identifier_marker: &str, text_marker: &str) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(identifier_marker);
        out.push_str(&entry.identifier);
        out.push('\n');
        out.push_str(text_marker);
        out.push_str(&entry.text);
        out.push('\n');
    }
    out
}

/// Parse alternating non-blank lines as identifier/value pairs.
///
/// Blank lines are discarded first. Even positions are identifiers, odd
/// positions are values; both are trimmed. A trailing identifier without a
/// value becomes an entry with empty text and sets
/// [`PairDocument::dangling`].
pub fn parse_pairs(input: &str) -> PairDocument {
    let mut metadata = DocumentMetadata::for_input(input, &GameDialect);
    let lines = split_lines(input);
    metadata.line_count = lines.len();

    let non_blank = lines
        .iter()
        .filter(|line| !line.trimmed().is_empty())
        .collect::<Vec<_>>();

    let pairs = non_blank
        .chunks(2)
        .map(|chunk| Entry {
            identifier: chunk[0].trimmed().to_string(),
            text: chunk
                .get(1)
                .map(|value| value.trimmed().to_string())
                .unwrap_or_default(),
            source_line: chunk[0].span.line,
        })
        .collect::<Vec<_>>();

    let dangling = non_blank.len() % 2 == 1;
    if dangling && let Some(last) = non_blank.last() {
        metadata.parse_findings.push(ParseFinding {
            code: "dangling-identifier".to_string(),
            message: "last identifier has no value line".to_string(),
            span: last.span.clone(),
        });
    }

    PairDocument {
        metadata,
        pairs,
        non_blank_lines: non_blank.len(),
        dangling,
    }
}

/// Parse keyed blocks using the built-in game dialect.
pub fn parse_blocks(input: &str) -> BlockDocument {
    parse_blocks_with_dialect(input, &GameDialect)
}

/// Parse keyed blocks with the given dialect.
///
/// A block-key line opens a block named by the trimmed line; all following
/// lines up to the next key belong to it. A repeated key restarts the earlier
/// block in place.
pub fn parse_blocks_with_dialect<D: Dialect>(input: &str, dialect: &D) -> BlockDocument {
    let mut metadata = DocumentMetadata::for_input(input, dialect);
    let lines = split_lines(input);
    metadata.line_count = lines.len();

    let mut blocks: Vec<Block> = Vec::new();
    let mut preamble = Vec::new();
    let mut current: Option<usize> = None;

    for line in &lines {
        if dialect.classify(&line.raw) == LineKind::BlockKey {
            let key = line.trimmed().to_string();
            if let Some(pos) = blocks.iter().position(|block| block.key == key) {
                metadata.parse_findings.push(ParseFinding {
                    code: "duplicate-block-key".to_string(),
                    message: format!("block `{key}` is declared again; earlier lines dropped"),
                    span: line.span.clone(),
                });
                blocks[pos].lines.clear();
                blocks[pos].span = line.span.clone();
                current = Some(pos);
            } else {
                blocks.push(Block {
                    key,
                    span: line.span.clone(),
                    lines: Vec::new(),
                });
                current = Some(blocks.len() - 1);
            }
            continue;
        }

        let block_line = BlockLine {
            line: line.span.line,
            text: line.raw.clone(),
        };
        match current {
            Some(pos) => blocks[pos].lines.push(block_line),
            None => preamble.push(block_line),
        }
    }

    BlockDocument {
        metadata,
        blocks,
        preamble,
    }
}
