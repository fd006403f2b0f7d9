//! End-to-end CLI integration tests for the `vel` binary.
//!
//! Each test runs the binary as a subprocess via `assert_cmd`, writing any
//! props/template/settings fixtures into its own temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Build a `Command` targeting the cargo-built `vel` binary.
fn vel() -> Command {
    let mut cmd = Command::cargo_bin("vel").unwrap();
    // Keep settings discovery out of the developer's environment.
    cmd.env_remove("VELLUM_CONFIG");
    cmd
}

/// Write a props file into a temp dir and return the pair.
fn props_fixture(json: &str) -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("props.json");
    std::fs::write(&path, json).unwrap();
    let path = path.to_string_lossy().into_owned();
    (tmp, path)
}

// ---------------------------------------------------------------------------
// eval
// ---------------------------------------------------------------------------

#[test]
fn eval_literal_passes_through() {
    vel()
        .args(["eval", "Sword of Dawn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sword of Dawn"));
}

#[test]
fn eval_dice_with_seed() {
    vel()
        .args(["eval", "You rolled ${2d6+3}$", "--explain", "--seed-rolls", "4,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You rolled 12"))
        .stdout(predicate::str::contains("2d6 (4, 5) + 3"));
}

#[test]
fn eval_reads_props_file() {
    let (_tmp, props) = props_fixture(r#"{ "str": 7 }"#);
    vel()
        .args(["--props", props.as_str(), "eval", "${str}$"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));
}

#[test]
fn eval_missing_reference_uses_default_flag() {
    vel()
        .args(["eval", "${missing}$", "--default", "n/a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n/a"));
}

#[test]
fn eval_json_output() {
    let output = vel()
        .args(["--json", "eval", "${1 + 2}$"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["result"], "3");
}

#[test]
fn eval_malformed_span_degrades() {
    vel()
        .args(["eval", "hp: ${2 +}$"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hp: ${2 +}$"));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_keep_highest_with_seed() {
    vel()
        .args(["roll", "4d6kh3", "--seed-rolls", "6,2,5,4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15"))
        .stdout(predicate::str::contains("4d6kh3[6, (2), 5, 4] = 15"));
}

#[test]
fn roll_rejects_garbage() {
    vel()
        .args(["roll", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dice expression"));
}

#[test]
fn roll_json_output() {
    let output = vel()
        .args(["--json", "roll", "2d6", "--seed-rolls", "3,4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total"], 7);
    assert_eq!(parsed["dice"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

#[test]
fn get_resolves_nested_path() {
    let (_tmp, props) = props_fixture(r#"{ "attributes": { "dex": { "mod": 2 } } }"#);
    vel()
        .args(["--props", props.as_str(), "get", "attributes.dex.mod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn get_missing_path_uses_default() {
    let (_tmp, props) = props_fixture(r#"{}"#);
    vel()
        .args(["--props", props.as_str(), "get", "nothing.here", "--default", "fallback"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fallback"));
}

// ---------------------------------------------------------------------------
// template
// ---------------------------------------------------------------------------

const TEMPLATE_JSON: &str = r#"{
    "name": "fighter",
    "sections": [
        {
            "label": "Vitals",
            "components": [
                { "type": "label", "text": "HP: ${hp}$" },
                { "type": "number-field", "key": "hp", "min": 0 },
                { "type": "roll-button", "key": "attack", "formula": "${1d20 + str}$" }
            ]
        }
    ]
}"#;

fn template_fixture() -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fighter.sheet.json");
    std::fs::write(&path, TEMPLATE_JSON).unwrap();
    let path = path.to_string_lossy().into_owned();
    (tmp, path)
}

#[test]
fn template_check_counts_components() {
    let (_tmp, template) = template_fixture();
    vel()
        .args(["template", "check", template.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 components"));
}

#[test]
fn template_check_fails_on_unknown_type() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    std::fs::write(
        &path,
        r#"{ "name": "broken", "sections": [{ "label": "Main", "components": [{ "type": "hologram" }] }] }"#,
    )
    .unwrap();
    vel()
        .args(["template", "check", path.to_string_lossy().as_ref()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hologram"));
}

#[test]
fn template_show_renders_against_props() {
    let (_props_tmp, props) = props_fixture(r#"{ "hp": 9, "str": 3 }"#);
    let (_tmp, template) = template_fixture();
    vel()
        .args(["--props", props.as_str(), "template", "show", template.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("HP: 9"))
        .stdout(predicate::str::contains("sheet"));
}

#[test]
fn template_roll_activates_button() {
    let (_props_tmp, props) = props_fixture(r#"{ "str": 3 }"#);
    let (_tmp, template) = template_fixture();
    vel()
        .args([
            "--props", props.as_str(),
            "template", "roll", template.as_str(), "attack",
            "--seed-rolls", "15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("18"))
        .stdout(predicate::str::contains("1d20 (15) + str (3)"));
}

#[test]
fn template_roll_unknown_key_fails() {
    let (_tmp, template) = template_fixture();
    vel()
        .args(["template", "roll", template.as_str(), "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no component with key"));
}

// ---------------------------------------------------------------------------
// components / initiative / version
// ---------------------------------------------------------------------------

#[test]
fn components_lists_builtins() {
    vel()
        .args(["components"])
        .assert()
        .success()
        .stdout(predicate::str::contains("number-field"))
        .stdout(predicate::str::contains("roll-button"));
}

#[test]
fn functions_lists_builtins() {
    vel()
        .args(["functions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("floor"))
        .stdout(predicate::str::contains("lookup"));
}

#[test]
fn initiative_uses_configured_formula() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("vellum.yaml");
    std::fs::write(
        &config,
        "initiative_formula: \"${1d20 + attributes.dex.mod}$\"\n",
    )
    .unwrap();
    let props = tmp.path().join("props.json");
    std::fs::write(&props, r#"{ "attributes": { "dex": { "mod": 2 } } }"#).unwrap();

    vel()
        .args([
            "--config", config.to_string_lossy().as_ref(),
            "--props", props.to_string_lossy().as_ref(),
            "initiative",
            "--seed-rolls", "11",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("13"));
}

#[test]
fn initiative_without_config_fails() {
    let tmp = TempDir::new().unwrap();
    vel()
        .current_dir(tmp.path())
        .args(["initiative"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no initiative formula"));
}

#[test]
fn version_prints() {
    vel()
        .args(["version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vel "));
}
