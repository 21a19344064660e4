use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_file_path(prefix: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("gametext-{prefix}-{nonce}.txt"))
}

#[test]
fn check_cli_prints_markdown_report_and_flags_issues() {
    let original = temp_file_path("orig-markdown");
    let translated = temp_file_path("trans-markdown");
    fs::write(&original, "SelfId=1\nText=Hello <b>{name}</b>\n").expect("write original");
    fs::write(&translated, "SelfId=1\nText=Xin chao {name}\n").expect("write translated");

    let output = Command::new(env!("CARGO_BIN_EXE_gametext-check"))
        .arg(&original)
        .arg(&translated)
        .output()
        .expect("run gametext-check");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Translation Check Report"));
    assert!(stdout.contains("tag count changed: 2 -> 0"));
}

#[test]
fn check_cli_exits_cleanly_for_identical_files() {
    let original = temp_file_path("orig-clean");
    let translated = temp_file_path("trans-clean");
    fs::write(&original, "SelfId=1\nText=Hello\n").expect("write original");
    fs::write(&translated, "SelfId=1\nText=Hello\n").expect("write translated");

    let output = Command::new(env!("CARGO_BIN_EXE_gametext-check"))
        .arg(&original)
        .arg(&translated)
        .arg("--log")
        .output()
        .expect("run gametext-check");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK! No missing lines, tags or variables detected."));
}

#[test]
fn check_cli_emits_json_for_each_mode() {
    let original = temp_file_path("orig-json");
    let translated = temp_file_path("trans-json");
    fs::write(&original, "greet\nHello {n}\n").expect("write original");
    fs::write(&translated, "greet\nXin chao\n").expect("write translated");

    let output = Command::new(env!("CARGO_BIN_EXE_gametext-check"))
        .arg(&original)
        .arg(&translated)
        .args(["--mode", "pairs", "--json"])
        .output()
        .expect("run gametext-check");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["issues"][0]["kind"], "variable_count");
    assert_eq!(value["total_original"], 1);

    let output = Command::new(env!("CARGO_BIN_EXE_gametext-check"))
        .arg(&original)
        .arg(&translated)
        .args(["--mode", "lines", "--json", "--navigation", "text-changes"])
        .output()
        .expect("run gametext-check");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["navigation"], "text-changes");
    assert_eq!(value["changed_lines"][0]["line_number"], 2);
}

#[test]
fn check_cli_applies_config_and_marker_overrides() {
    let original = temp_file_path("orig-config");
    let translated = temp_file_path("trans-config");
    let config = temp_file_path("config");
    fs::write(&original, "Key=1\nValue=Hi<WAIT>\n").expect("write original");
    fs::write(&translated, "Key=1\nValue=Chao\n").expect("write translated");
    fs::write(&config, r#"{"game_tags": ["WAIT"]}"#).expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_gametext-check"))
        .arg(&original)
        .arg(&translated)
        .arg("--config")
        .arg(&config)
        .args(["--id-marker", "Key=", "--text-marker", "Value=", "--json"])
        .output()
        .expect("run gametext-check");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    let kinds = value["issues"]
        .as_array()
        .expect("issues array")
        .iter()
        .map(|issue| issue["kind"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec!["tag_count", "game_tag"]);
}

#[test]
fn check_cli_reports_missing_input_as_failure() {
    let missing = temp_file_path("does-not-exist");
    let output = Command::new(env!("CARGO_BIN_EXE_gametext-check"))
        .arg(&missing)
        .arg(&missing)
        .output()
        .expect("run gametext-check");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
}

#[test]
fn replay_fixtures_runs_every_json_fixture() {
    let output = Command::new(env!("CARGO_BIN_EXE_gametext-replay-fixtures"))
        .output()
        .expect("run gametext-replay-fixtures");

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("replayed 5 fixture(s)"));
}
