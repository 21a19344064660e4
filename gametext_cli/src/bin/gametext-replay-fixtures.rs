use std::fs;
use std::path::{Path, PathBuf};

use gametext_diff::{CheckMode, CompareOptions, ComparisonInput, IssueKind, check};
use gametext_ir::MarkerDialect;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    #[serde(default)]
    mode: CheckMode,
    #[serde(default)]
    dialect: Option<MarkerDialect>,
    original: String,
    translated: String,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    issue_kinds: Vec<IssueKind>,
    change_count: usize,
}

/// JSON fixture files under `dir`, in path order.
fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"));
    paths.sort();
    Ok(paths)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");

    let mut checked = 0usize;
    for path in fixture_paths(&repo_root.join("fixtures"))? {
        let raw = fs::read_to_string(&path)?;
        let fixture: Fixture = serde_json::from_str(&raw)?;

        let mut options = CompareOptions::default();
        if let Some(dialect) = fixture.dialect {
            options = options.with_dialect(dialect);
        }
        let outcome = check(
            &ComparisonInput::new(&fixture.original, &fixture.translated),
            fixture.mode,
            &options,
        );
        let report = outcome
            .report()
            .ok_or_else(|| format!("fixture {}: check failed: {:?}", fixture.name, outcome.error()))?;

        let issue_kinds = report
            .issues
            .iter()
            .map(|issue| issue.kind)
            .collect::<Vec<_>>();
        if issue_kinds != fixture.expected.issue_kinds {
            return Err(format!(
                "fixture {}: issue_kinds mismatch: expected {:?}, got {:?}",
                fixture.name, fixture.expected.issue_kinds, issue_kinds
            )
            .into());
        }

        if report.changes.len() != fixture.expected.change_count {
            return Err(format!(
                "fixture {}: change_count mismatch: expected {}, got {}",
                fixture.name,
                fixture.expected.change_count,
                report.changes.len()
            )
            .into());
        }

        checked += 1;
    }

    println!("replayed {checked} fixture(s)");
    Ok(())
}
