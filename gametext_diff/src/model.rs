use serde::{Deserialize, Serialize};

use gametext_ir::MarkerDialect;

/// Which line records the navigation list keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationMode {
    #[default]
    TagMismatches,
    TextChanges,
}

/// Comparison strategy for whole-file checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckMode {
    /// Marker-format entries matched by identifier.
    #[default]
    Keyed,
    /// Alternating identifier/value lines compared by position.
    Pairs,
    /// Keyed blocks compared line by line.
    Blocks,
}

/// Options controlling parsing markers, reporting and resource limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    pub dialect: MarkerDialect,
    pub navigation: NavigationMode,
    pub flag_duplicate_identifiers: bool,
    /// Angle-tag names reported as game control tags.
    pub game_tags: Vec<String>,
    /// Upper bound on LCS table cells for one character diff; unbounded when unset.
    pub max_diff_cells: Option<usize>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            dialect: MarkerDialect::default(),
            navigation: NavigationMode::default(),
            flag_duplicate_identifiers: true,
            game_tags: DEFAULT_GAME_TAGS.iter().map(ToString::to_string).collect(),
            max_diff_cells: None,
        }
    }
}

/// Control tags with special meaning to the game engine.
pub const DEFAULT_GAME_TAGS: [&str; 3] = ["KEY_WAIT", "NO_INPUT", "cf"];

impl CompareOptions {
    /// Override the marker dialect.
    pub fn with_dialect(mut self, dialect: MarkerDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Override the navigation mode used by line comparison.
    pub fn with_navigation(mut self, navigation: NavigationMode) -> Self {
        self.navigation = navigation;
        self
    }

    /// Enable or disable duplicate-identifier diagnostics.
    pub fn with_duplicate_check(mut self, enabled: bool) -> Self {
        self.flag_duplicate_identifiers = enabled;
        self
    }

    /// Replace the set of game control tag names.
    pub fn with_game_tags(mut self, game_tags: Vec<String>) -> Self {
        self.game_tags = game_tags;
        self
    }

    /// Cap the character diff table size.
    pub fn with_max_diff_cells(mut self, max_diff_cells: usize) -> Self {
        self.max_diff_cells = Some(max_diff_cells);
        self
    }
}

/// Immutable pair of texts handed to a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonInput<'a> {
    pub original: &'a str,
    pub translated: &'a str,
}

impl<'a> ComparisonInput<'a> {
    pub fn new(original: &'a str, translated: &'a str) -> Self {
        Self {
            original,
            translated,
        }
    }
}

/// Lexical class of a bracket-delimited token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Angle,
    Curly,
    Square,
}

impl TokenClass {
    pub const ALL: [TokenClass; 3] = [TokenClass::Angle, TokenClass::Curly, TokenClass::Square];
}

/// Normalized token values of one text, per class, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedTokens {
    pub angle: Vec<String>,
    pub curly: Vec<String>,
    pub square: Vec<String>,
}

impl ExtractedTokens {
    /// Borrow the token list of one class.
    pub fn class(&self, class: TokenClass) -> &[String] {
        match class {
            TokenClass::Angle => &self.angle,
            TokenClass::Curly => &self.curly,
            TokenClass::Square => &self.square,
        }
    }
}

/// Angle tag name with the number of parameters it was written with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSignature {
    pub name: String,
    pub param_count: usize,
}

/// Multiset difference between original and translated tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagReport {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    /// Set when a token occurs on both sides with different counts.
    pub mismatch_counts: bool,
}

/// Classification of one character span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStatus {
    Same,
    Added,
    Removed,
}

/// Maximal run of characters sharing one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSpan {
    pub text: String,
    pub status: SpanStatus,
}

impl DiffSpan {
    pub(crate) fn empty() -> Self {
        Self {
            text: String::new(),
            status: SpanStatus::Same,
        }
    }
}

/// Index-aligned span sequences for side-by-side rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharDiff {
    pub original: Vec<DiffSpan>,
    pub translated: Vec<DiffSpan>,
}

/// Text-level status of one aligned line pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    Same,
    Added,
    Removed,
    Modified,
}

/// One positional comparison unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    pub line_number: usize,
    pub original: String,
    pub translated: String,
    pub status: LineStatus,
    pub tag_report: Option<TagReport>,
    pub char_diff: Option<CharDiff>,
}

/// Why a line is listed for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    TagMismatch,
    TextChange,
}

/// Navigation entry pointing at a non-trivial line record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedLine {
    pub line_number: usize,
    pub index: usize,
    pub kind: NavigationKind,
    pub status: LineStatus,
    pub tag_report: Option<TagReport>,
}

/// Aggregate counters for a line comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineStats {
    pub same: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub tag_mismatches: usize,
}

/// Positional line comparison output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineComparison {
    pub navigation: NavigationMode,
    pub lines: Vec<LineRecord>,
    pub changed_lines: Vec<ChangedLine>,
    pub stats: LineStats,
}

/// Category of a reported finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    Extra,
    IdentifierChanged,
    TagCount,
    VariableCount,
    GameTag,
    ContentMissing,
    ContentUnexpected,
    LineCountMismatch,
    TagMismatch,
    TagParamCount,
    DuplicateIdentifier,
}

impl IssueKind {
    /// Stable snake_case code, as serialized.
    pub fn code(self) -> &'static str {
        match self {
            IssueKind::Missing => "missing",
            IssueKind::Extra => "extra",
            IssueKind::IdentifierChanged => "identifier_changed",
            IssueKind::TagCount => "tag_count",
            IssueKind::VariableCount => "variable_count",
            IssueKind::GameTag => "game_tag",
            IssueKind::ContentMissing => "content_missing",
            IssueKind::ContentUnexpected => "content_unexpected",
            IssueKind::LineCountMismatch => "line_count_mismatch",
            IssueKind::TagMismatch => "tag_mismatch",
            IssueKind::TagParamCount => "tag_param_count",
            IssueKind::DuplicateIdentifier => "duplicate_identifier",
        }
    }
}

/// Severity level for an [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Warning,
    Info,
}

/// Original/translated count pair carried by count issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountChange {
    pub original: usize,
    pub translated: usize,
}

/// One structural or content finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub level: FindingLevel,
    pub identifier: String,
    pub message: String,
    /// 1-based line on the original side.
    pub line: Option<usize>,
    /// 1-based line on the translated side.
    pub translated_line: Option<usize>,
    pub counts: Option<CountChange>,
    pub tokens: Option<TagReport>,
}

impl Issue {
    pub(crate) fn warning(kind: IssueKind, identifier: &str, message: String) -> Self {
        Self {
            kind,
            level: FindingLevel::Warning,
            identifier: identifier.to_string(),
            message,
            line: None,
            translated_line: None,
            counts: None,
            tokens: None,
        }
    }

    pub(crate) fn info(kind: IssueKind, identifier: &str, message: String) -> Self {
        Self {
            level: FindingLevel::Info,
            ..Self::warning(kind, identifier, message)
        }
    }

    pub(crate) fn at_lines(mut self, line: Option<usize>, translated_line: Option<usize>) -> Self {
        self.line = line;
        self.translated_line = translated_line;
        self
    }

    pub(crate) fn with_counts(mut self, original: usize, translated: usize) -> Self {
        self.counts = Some(CountChange {
            original,
            translated,
        });
        self
    }

    pub(crate) fn with_tokens(mut self, tokens: Option<TagReport>) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Text-level modification of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub identifier: String,
    pub original: String,
    pub translated: String,
    pub line: Option<usize>,
}

/// Aggregated findings of one whole-file check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    pub issues: Vec<Issue>,
    pub changes: Vec<Change>,
    pub total_original: usize,
    pub total_translated: usize,
}

impl Report {
    /// Whether any warning-level issue was found.
    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.level == FindingLevel::Warning)
    }

    /// Issues of one kind, in report order.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}

/// Top-level result: a complete report or a single error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Completed(Report),
    Failed { error: String },
}

impl Outcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            Outcome::Completed(report) => Some(report),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Failed { error } => Some(error),
        }
    }
}
