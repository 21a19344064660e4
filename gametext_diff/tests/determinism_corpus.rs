use std::fs;
use std::path::Path;

use gametext_diff::{CheckMode, CompareOptions, ComparisonInput, check, compare_lines};

#[test]
fn checks_are_deterministic_for_embedded_corpus_pairs() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let testdata = repo_root.join("gametext_ir").join("testdata");

    let mut paths = fs::read_dir(&testdata)
        .expect("read testdata")
        .map(|entry| entry.expect("entry").path())
        .filter(|path| path.is_file())
        .collect::<Vec<_>>();
    paths.sort();
    let samples = paths
        .iter()
        .map(|path| fs::read_to_string(path).expect("read sample"))
        .collect::<Vec<_>>();

    let options = CompareOptions::default();
    for (i, a_text) in samples.iter().enumerate() {
        for (j, b_text) in samples.iter().enumerate() {
            let input = ComparisonInput::new(a_text, b_text);
            for mode in [CheckMode::Keyed, CheckMode::Pairs, CheckMode::Blocks] {
                let one = check(&input, mode, &options);
                let two = check(&input, mode, &options);

                let one_json = serde_json::to_string_pretty(&one).expect("serialize first");
                let two_json = serde_json::to_string_pretty(&two).expect("serialize second");
                assert_eq!(
                    one_json, two_json,
                    "flapping {mode:?} output for corpus pair ({i}, {j})"
                );
            }

            let one = compare_lines(a_text, b_text, &options).expect("first line comparison");
            let two = compare_lines(a_text, b_text, &options).expect("second line comparison");
            assert_eq!(one, two, "flapping line output for corpus pair ({i}, {j})");
        }
    }
}

#[test]
fn dialogue_corpus_reports_expected_drift() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let testdata = repo_root.join("gametext_ir").join("testdata");
    let original = fs::read_to_string(testdata.join("dialogue_en.txt")).expect("read original");
    let translated =
        fs::read_to_string(testdata.join("dialogue_vi.txt")).expect("read translation");

    let outcome = check(
        &ComparisonInput::new(&original, &translated),
        CheckMode::Keyed,
        &CompareOptions::default(),
    );
    let report = outcome.report().expect("comparison completes");
    assert!(report.has_warnings());
    assert!(
        report
            .issues
            .iter()
            .any(|issue| issue.identifier == "intro_002" && issue.message.contains("<NO_INPUT>"))
    );
}
