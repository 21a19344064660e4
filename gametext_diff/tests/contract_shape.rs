use gametext_diff::{CompareOptions, ComparisonInput, Outcome, compare, compare_lines};
use serde_json::Value;

#[test]
fn completed_outcome_json_shape_contract() {
    let outcome = compare(
        &ComparisonInput::new("SelfId=1\nText=Hello {name}\n", "SelfId=1\nText=Xin chao\n"),
        &CompareOptions::default(),
    );
    let value = serde_json::to_value(&outcome).expect("serialize outcome");

    let obj = value.as_object().expect("outcome should be object");
    let mut keys = obj.keys().map(String::as_str).collect::<Vec<_>>();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["changes", "issues", "total_original", "total_translated"]
    );

    let issue = obj["issues"][0].as_object().expect("issue should be object");
    for key in [
        "kind",
        "level",
        "identifier",
        "message",
        "line",
        "translated_line",
        "counts",
        "tokens",
    ] {
        assert!(issue.contains_key(key), "issue missing key {key}");
    }
    assert_eq!(issue["kind"], "variable_count");
    assert_eq!(issue["level"], "warning");
    assert_eq!(issue["counts"]["original"], 1);
    assert_eq!(issue["tokens"]["missing"][0], "{name}");

    let change = &obj["changes"][0];
    assert_eq!(change["identifier"], "1");
    assert_eq!(change["translated"], "Xin chao");
}

#[test]
fn failed_outcome_json_shape_contract() {
    let outcome = Outcome::Failed {
        error: "character diff needs 16 table cells, limit is 4".to_string(),
    };
    let value = serde_json::to_value(&outcome).expect("serialize outcome");
    assert_eq!(
        value,
        serde_json::json!({ "error": "character diff needs 16 table cells, limit is 4" })
    );

    let parsed: Outcome = serde_json::from_value(value).expect("deserialize outcome");
    assert_eq!(parsed, outcome);
}

#[test]
fn line_comparison_json_uses_lowercase_statuses() {
    let comparison = compare_lines("abc", "abd", &CompareOptions::default())
        .expect("comparison completes");
    let value = serde_json::to_value(&comparison).expect("serialize comparison");

    assert_eq!(value["navigation"], "tag-mismatches");
    assert_eq!(value["lines"][0]["status"], "modified");
    assert_eq!(value["lines"][0]["char_diff"]["original"][1]["status"], "removed");
    assert_eq!(value["lines"][0]["char_diff"]["translated"][1]["text"], "d");
}

#[test]
fn options_load_from_partial_json() {
    let options: CompareOptions =
        serde_json::from_str(r#"{"navigation": "text-changes", "game_tags": ["WAIT"]}"#)
            .expect("parse options");
    assert_eq!(options.game_tags, vec!["WAIT".to_string()]);
    assert!(options.flag_duplicate_identifiers);
    assert_eq!(options.dialect.identifier_marker, "SelfId=");
    assert_eq!(options.max_diff_cells, None);
}
