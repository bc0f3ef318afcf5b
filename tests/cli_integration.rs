//! CLI integration tests for caisson.
//!
//! These tests verify the orchestration workflow end to end against
//! fixture projects, without requiring a C++ compiler (plan emission is
//! exercised with `--no-probe`).

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the caisson binary command.
fn caisson() -> Command {
    Command::cargo_bin("caisson").unwrap()
}

/// Create a temporary directory for fixture projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Lay out a minimal wrapper repository.
fn write_project(root: &Path, wrapper_version: &str, core_version: &str) {
    fs::write(
        root.join("Caisson.toml"),
        format!(
            "[package]\nname = \"adcmod\"\nversion = \"{wrapper_version}\"\n"
        ),
    )
    .unwrap();

    let core_dir = root.join("extension/core");
    fs::create_dir_all(&core_dir).unwrap();
    fs::write(
        core_dir.join("core_config.json"),
        format!(r#"{{"version": "{core_version}", "libraries": ["adccore"]}}"#),
    )
    .unwrap();

    let ext = root.join("extension");
    fs::write(ext.join("bindings.cc"), "// glue\n").unwrap();
}

// ============================================================================
// caisson plan
// ============================================================================

#[test]
fn test_plan_emits_json() {
    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.2.0");

    let output = caisson()
        .args(["plan", "--no-probe"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(plan["name"], "adcmod");
    assert_eq!(plan["version"], "1.2.0");
    assert_eq!(plan["libraries"][0], "adccore");
    assert_eq!(plan["library_dirs"][0], "adcmod/lib");
}

#[test]
fn test_plan_writes_output_file() {
    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.2.0");

    caisson()
        .args(["plan", "--no-probe", "--output", "plan.json"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let contents = fs::read_to_string(tmp.path().join("plan.json")).unwrap();
    assert!(contents.contains("adccore"));
}

#[test]
fn test_plan_outside_project_root() {
    let tmp = temp_dir();

    caisson()
        .args(["plan", "--no-probe"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Caisson.toml"))
        .stderr(predicate::str::contains("top level"));
}

#[test]
fn test_plan_missing_core_config() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("Caisson.toml"),
        "[package]\nname = \"adcmod\"\nversion = \"1.2.0\"\n",
    )
    .unwrap();

    caisson()
        .args(["plan", "--no-probe"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("core config not found"));
}

#[test]
fn test_plan_version_mismatch_without_core_source() {
    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.1.0");

    caisson()
        .args(["plan", "--no-probe"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("version mismatch"))
        .stderr(predicate::str::contains("1.2.0"))
        .stderr(predicate::str::contains("1.1.0"));
}

#[test]
#[cfg(unix)]
fn test_plan_rebuild_heals_version_mismatch() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.1.0");

    // A core "build" that writes a matching config.
    let core_dir = tmp.path().join("core");
    fs::create_dir_all(&core_dir).unwrap();
    let script = core_dir.join("build.sh");
    fs::write(
        &script,
        "#!/bin/sh\nprintf '{\"version\": \"1.2.0\", \"libraries\": [\"adccore\"]}' > extension/core/core_config.json\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    caisson()
        .args(["plan", "--no-probe"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"1.2.0\""));
}

// ============================================================================
// caisson linkplan
// ============================================================================

#[test]
fn test_linkplan_linux() {
    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.2.0");

    caisson()
        .args(["linkplan", "--platform", "linux"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("$ORIGIN/adcmod/lib"));
}

#[test]
fn test_linkplan_macos() {
    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.2.0");

    caisson()
        .args(["linkplan", "--platform", "darwin"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-Wl,-rpath,@loader_path/adcmod/lib"));
}

#[test]
fn test_linkplan_rejects_unknown_platform() {
    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.2.0");

    caisson()
        .args(["linkplan", "--platform", "windows"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported platform"));
}

// ============================================================================
// caisson doctor
// ============================================================================

#[test]
fn test_doctor_fails_in_empty_directory() {
    let tmp = temp_dir();

    caisson()
        .arg("doctor")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"));
}

// ============================================================================
// caisson flags
// ============================================================================

#[test]
#[ignore] // Requires a C++ compiler
fn test_flags_reports_standard() {
    let tmp = temp_dir();
    write_project(tmp.path(), "1.2.0", "1.2.0");

    caisson()
        .arg("flags")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-std=c++"));
}
