use crate::error::CompareError;
use crate::model::{CharDiff, DiffSpan, SpanStatus};

/// LCS table over two code-point sequences, stored row-major.
struct LcsTable {
    cols: usize,
    cells: Vec<usize>,
}

impl LcsTable {
    fn build(a: &[char], b: &[char]) -> Self {
        let cols = b.len() + 1;
        let mut cells = vec![0usize; (a.len() + 1) * cols];

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                cells[i * cols + j] = if a[i - 1] == b[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
            }
        }

        Self { cols, cells }
    }

    fn at(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }
}

/// Character-level diff of two strings.
///
/// Equal characters become `same` on both sides. On a mismatch the original
/// side is consumed (`removed`) whenever moving up keeps at least as long a
/// common subsequence as moving left; otherwise the translated side is
/// consumed (`added`). Both span sequences are padded with trailing empty
/// `same` spans to equal length.
pub fn diff_chars(original: &str, translated: &str) -> CharDiff {
    let a = original.chars().collect::<Vec<_>>();
    let b = translated.chars().collect::<Vec<_>>();
    diff_code_points(&a, &b)
}

/// [`diff_chars`] with an upper bound on LCS table cells.
pub fn diff_chars_bounded(
    original: &str,
    translated: &str,
    max_cells: usize,
) -> Result<CharDiff, CompareError> {
    let a = original.chars().collect::<Vec<_>>();
    let b = translated.chars().collect::<Vec<_>>();
    let cells = (a.len() + 1).saturating_mul(b.len() + 1);
    if cells > max_cells {
        return Err(CompareError::DiffTooLarge {
            cells,
            limit: max_cells,
        });
    }
    Ok(diff_code_points(&a, &b))
}

fn diff_code_points(a: &[char], b: &[char]) -> CharDiff {
    let dp = LcsTable::build(a, b);

    let mut i = a.len();
    let mut j = b.len();
    let mut rev_original = Vec::with_capacity(a.len());
    let mut rev_translated = Vec::with_capacity(b.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            rev_original.push((a[i - 1], SpanStatus::Same));
            rev_translated.push((b[j - 1], SpanStatus::Same));
            i -= 1;
            j -= 1;
        } else if i > 0 && (j == 0 || dp.at(i - 1, j) >= dp.at(i, j - 1)) {
            rev_original.push((a[i - 1], SpanStatus::Removed));
            i -= 1;
        } else {
            rev_translated.push((b[j - 1], SpanStatus::Added));
            j -= 1;
        }
    }

    rev_original.reverse();
    rev_translated.reverse();

    let mut original = group_spans(&rev_original);
    let mut translated = group_spans(&rev_translated);

    let len = original.len().max(translated.len());
    original.resize_with(len, DiffSpan::empty);
    translated.resize_with(len, DiffSpan::empty);

    CharDiff {
        original,
        translated,
    }
}

fn group_spans(chars: &[(char, SpanStatus)]) -> Vec<DiffSpan> {
    let mut spans: Vec<DiffSpan> = Vec::new();
    for (ch, status) in chars.iter().copied() {
        match spans.last_mut() {
            Some(last) if last.status == status => last.text.push(ch),
            _ => spans.push(DiffSpan {
                text: ch.to_string(),
                status,
            }),
        }
    }
    spans
}
