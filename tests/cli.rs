use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A template root with one usable division (`im`) and one without a template list.
fn template_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::write(
        root.path().join("divisions.json"),
        r#"{"divisions": [
            {"folder": "", "name": "Pick a division"},
            {"folder": "im", "name": "Internal Medicine"},
            {"folder": "er", "name": "Emergency"}
        ]}"#,
    )
    .unwrap();

    let im = root.path().join("templates").join("im");
    fs::create_dir_all(&im).unwrap();
    fs::write(
        im.join("templates.json"),
        r#"{"templates": [
            {"name": "Admission", "file": "adm.json"},
            {"name": "Discharge (draft)"}
        ]}"#,
    )
    .unwrap();
    fs::write(
        im.join("adm.json"),
        r#"{"sections": {
            "Intro": [{"type": "text", "value": "65M"}],
            "S": [
                {"type": "input", "id": "cc", "label": "CC", "value": "cough"},
                {"type": "checkbox-group", "id": "sx", "label": "Sx", "options": [
                    {"value": "Fever", "withInput": true, "detailPrefix": " x", "detailValue": "3d"},
                    {"value": "Dyspnea", "checked": true}
                ]}
            ],
            "O": [{"type": "input", "id": "bt", "label": "BT", "value": "36.8", "suffix": "°C"}],
            "A+P": [
                {"type": "note", "value": "<b>Plan</b> below"},
                {"type": "textarea", "id": "plan", "prefix": "", "value": "observe"}
            ]
        }}"#,
    )
    .unwrap();
    root
}

fn chartpad(root: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chartpad").unwrap();
    cmd.env("CHARTPAD_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("CHARTPAD_LOG")
        .arg("--root")
        .arg(root);
    cmd
}

#[test]
fn test_divisions_lists_selectable_folders() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .arg("divisions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Internal Medicine"))
        .stdout(predicate::str::contains("er"))
        .stdout(predicate::str::contains("Pick a division").not());
}

#[test]
fn test_templates_lists_entries() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .args(["templates", "-d", "im"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admission"))
        .stdout(predicate::str::contains("adm.json"))
        .stdout(predicate::str::contains("Discharge (draft)"));
}

#[test]
fn test_text_all_uses_copy_order() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .arg("text")
        .assert()
        .success()
        .stdout("65M\n\nobserve\n\nCC：cough\nSx：Dyspnea\n\nBT：36.8°C\n");
}

#[test]
fn test_text_single_section() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .args(["text", "--section", "O"])
        .assert()
        .success()
        .stdout("BT：36.8°C\n");

    chartpad(root.path(), home.path())
        .args(["text", "-s", "S"])
        .assert()
        .success()
        .stdout("65M\n\nCC：cough\nSx：Dyspnea\n");
}

#[test]
fn test_text_applies_edits() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .args([
            "text",
            "-s",
            "S",
            "--check",
            "S-sx-0",
            "--uncheck",
            "S-sx-1",
            "--set",
            "S-cc=dry cough",
            "--set",
            "S-sx-0-detail=2w",
        ])
        .assert()
        .success()
        .stdout("65M\n\nCC：dry cough\nSx：Fever x2w\n");
}

#[test]
fn test_text_multiline_value() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .args(["text", "-s", "A+P", "--set", "A+P-plan=observe\\nrecheck CBC"])
        .assert()
        .success()
        .stdout("observe\nrecheck CBC\n");
}

#[test]
fn test_unknown_field_fails() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .args(["text", "--set", "S-missing=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("S-missing"));
}

#[test]
fn test_show_prints_sections_and_ids() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Intro"))
        .stdout(predicate::str::contains("== A+P"))
        .stdout(predicate::str::contains("S-cc"))
        .stdout(predicate::str::contains("S-sx-1"))
        .stdout(predicate::str::contains("Plan below"));
}

#[test]
fn test_missing_division_list_fails() {
    let root = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .arg("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load the division list"));
}

#[test]
fn test_division_without_template_list_fails() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .args(["text", "-d", "er"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load the template list for Emergency"));
}

#[test]
fn test_config_default_division_round_trip() {
    let root = template_root();
    let home = tempfile::tempdir().unwrap();

    chartpad(root.path(), home.path())
        .args(["config", "default_division", "im"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_division set to im"));

    chartpad(root.path(), home.path())
        .args(["config", "default_division"])
        .assert()
        .success()
        .stdout(predicate::str::contains("im"));

    chartpad(root.path(), home.path())
        .args(["config", "no_such_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
