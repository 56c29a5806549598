//! Integration tests for the solnorm CLI
//!
//! These tests invoke the actual solnorm binary and verify:
//! - Exit codes (0 = success, 1 = not canonical, 2 = error)
//! - stdout/stderr output
//! - JSON output shape
//! - All commands work end-to-end

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

fn solnorm_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_solnorm"))
}

fn fixture(path: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(path)
        .to_string_lossy()
        .into_owned()
}

fn run_solnorm(args: &[&str]) -> std::process::Output {
    Command::new(solnorm_bin())
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to execute solnorm")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("should be valid JSON")
}

fn card<'a>(doc: &'a serde_json::Value, scene: &str) -> &'a serde_json::Value {
    doc["cards"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["scene"] == scene)
        .unwrap_or_else(|| panic!("no card for {}", scene))
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_solnorm(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("solnorm"), "should contain 'solnorm'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_solnorm(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Normalize ─────────────────────────────────────────────

#[test]
fn test_normalize_partial_cards() {
    let output = run_solnorm(&["normalize", &fixture("documents/partial-cards.json")]);
    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert_eq!(doc["cards"].as_array().unwrap().len(), 12);
    assert_eq!(doc["cards"][0]["scene"], "height-work");
    assert_eq!(doc["cards"][11]["scene"], "logistics");

    let height = card(&doc, "height-work");
    assert_eq!(height["checked"], true);
    assert_eq!(height["description"], "Short description");
    assert_eq!(height["items"], serde_json::json!(["Harness"]));

    let welding = card(&doc, "welding");
    assert_eq!(welding["checked"], false);
    assert_eq!(welding["title"], "Welding and Hot Work");
    assert_eq!(welding["items"], serde_json::json!(["Visor"]));
}

#[test]
fn test_normalize_default_checked_flag() {
    let output = run_solnorm(&[
        "normalize",
        "--default-checked",
        "construction,wet-ground,bogus",
        &fixture("documents/partial-cards.json"),
    ]);
    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert_eq!(card(&doc, "construction")["checked"], true);
    assert_eq!(card(&doc, "wet-ground")["checked"], true);
    assert_eq!(card(&doc, "steel-work")["checked"], false);
}

#[test]
fn test_normalize_default_checked_from_config() {
    let output = run_solnorm(&[
        "--config",
        &fixture("config/wide-tolerance.toml"),
        "normalize",
        &fixture("documents/partial-cards.json"),
    ]);
    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert_eq!(card(&doc, "construction")["checked"], true);
    assert_eq!(card(&doc, "wet-ground")["checked"], true);
}

#[test]
fn test_normalize_detects_legacy_document() {
    let output = run_solnorm(&["normalize", &fixture("documents/legacy-groups.json")]);
    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert_eq!(card(&doc, "height-work")["checked"], true);
    assert_eq!(card(&doc, "dusty-work")["checked"], true);
}

#[test]
fn test_normalize_nonexistent_file() {
    let output = run_solnorm(&["normalize", "nonexistent.json"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "should mention error");
}

#[test]
fn test_normalize_not_json() {
    let output = run_solnorm(&["normalize", &fixture("documents/not-json.json")]);
    assert_eq!(output.status.code(), Some(2), "unparseable JSON should exit 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("JSON error"));
}

#[test]
fn test_invalid_config_exits_2() {
    let output = run_solnorm(&[
        "--config",
        &fixture("config/invalid.toml"),
        "normalize",
        &fixture("documents/partial-cards.json"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("legacy_tolerance"));
}

// ── Migrate ───────────────────────────────────────────────

#[test]
fn test_migrate_legacy_groups() {
    let output = run_solnorm(&["migrate", &fixture("documents/legacy-groups.json")]);
    assert!(output.status.success());
    let doc = stdout_json(&output);

    let height = card(&doc, "height-work");
    assert_eq!(height["checked"], true);
    assert_eq!(height["items"], serde_json::json!(["Full body harness"]));

    let dusty = card(&doc, "dusty-work");
    assert_eq!(dusty["checked"], true);
    assert_eq!(dusty["items"], serde_json::json!(["Respirators"]));

    let checked: Vec<_> = doc["cards"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["checked"] == true)
        .collect();
    assert_eq!(checked.len(), 2, "office group must be dropped");
}

#[test]
fn test_migrate_card_document_gives_default() {
    let output = run_solnorm(&["migrate", &fixture("documents/partial-cards.json")]);
    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert!(doc["cards"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["checked"] == false));
}

// ── Resolve ───────────────────────────────────────────────

#[test]
fn test_resolve_items() {
    let output = run_solnorm(&["resolve", &fixture("items/anchors.json")]);
    assert!(output.status.success());
    let points = stdout_json(&output);
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 4);

    // key
    assert_eq!(points[0]["x"], 50.0);
    assert_eq!(points[0]["y"], 8.0);
    // legacy chest coordinate upgraded
    assert_eq!(points[1]["x"], 50.0);
    assert_eq!(points[1]["y"], 50.0);
    // clamped raw point
    assert_eq!(points[2]["x"], 48.0);
    assert_eq!(points[2]["y"], 100.0);
    // no anchor
    assert!(points[3].is_null());
}

// ── Check / Hash ──────────────────────────────────────────

#[test]
fn test_check_canonical_document() {
    let output = run_solnorm(&["check", &fixture("documents/canonical.json")]);
    assert!(output.status.success(), "canonical document should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("is canonical"));
}

#[test]
fn test_check_non_canonical_document() {
    let output = run_solnorm(&["check", &fixture("documents/partial-cards.json")]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not canonical"));
}

#[test]
fn test_check_json_output() {
    let output = run_solnorm(&["check", "--json", &fixture("documents/canonical.json")]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["canonical"], true);
    assert_eq!(json["hash"].as_str().unwrap().len(), 64);
}

#[test]
fn test_hash_is_stable_across_runs() {
    let a = run_solnorm(&["hash", &fixture("documents/canonical.json")]);
    let b = run_solnorm(&["hash", &fixture("documents/canonical.json")]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    let hash = String::from_utf8_lossy(&a.stdout);
    assert_eq!(hash.trim().len(), 64);
}

// ── Tables ────────────────────────────────────────────────

#[test]
fn test_scenes_lists_taxonomy() {
    let output = run_solnorm(&["scenes"]);
    assert!(output.status.success());
    let scenes = stdout_json(&output);
    let scenes = scenes.as_array().unwrap();
    assert_eq!(scenes.len(), 12);
    assert_eq!(scenes[0]["scene"], "height-work");
    assert!(scenes[0]["keywords"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("height-work")));
}

#[test]
fn test_anchors_lists_registry() {
    let output = run_solnorm(&["anchors"]);
    assert!(output.status.success());
    let anchors = stdout_json(&output);
    let chest = anchors
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["key"] == "chest")
        .unwrap();
    assert_eq!(chest["point"]["x"], 50.0);
    assert_eq!(chest["point"]["y"], 50.0);
}
