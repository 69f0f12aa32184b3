//! CLI integration tests
//!
//! These tests run the binary against temporary Android project layouts.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="com.example.app">
  <application android:name=".MainApplication"/>
</manifest>
"#;

const CONFIG: &str = r#"visibility:
  - type: intent
    name: android.intent.action.VIEW
    data:
      - android:scheme: geo
  - type: package
    name: com.example.store
"#;

fn cli() -> Command {
    Command::cargo_bin("package-visibility").unwrap()
}

/// Lay out a minimal Gradle-style project with a manifest and a config
fn setup_project(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let manifest_dir = dir.path().join("app/src/main");
    fs::create_dir_all(&manifest_dir).unwrap();
    fs::write(manifest_dir.join("AndroidManifest.xml"), MANIFEST).unwrap();
    fs::write(dir.path().join(".visibility.yml"), config).unwrap();
    dir
}

fn manifest_contents(project: &Path) -> String {
    fs::read_to_string(project.join("app/src/main/AndroidManifest.xml")).unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("package-visibility"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--check"));
}

#[test]
fn test_cli_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("package-visibility"));
}

// ============================================================================
// Merge Tests
// ============================================================================

#[test]
fn test_cli_merges_declared_entries() {
    let project = setup_project(CONFIG);

    cli().arg(project.path()).assert().success();

    let contents = manifest_contents(project.path());
    assert!(contents.contains("<queries>"));
    assert!(contents.contains(r#"<action android:name="android.intent.action.VIEW"/>"#));
    assert!(contents.contains(r#"<data android:scheme="geo"/>"#));
    assert!(contents.contains(r#"<package android:name="com.example.store"/>"#));
}

#[test]
fn test_cli_second_run_changes_nothing() {
    let project = setup_project(CONFIG);

    cli().arg(project.path()).assert().success();
    let first_pass = manifest_contents(project.path());

    cli()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));

    assert_eq!(manifest_contents(project.path()), first_pass);
}

#[test]
fn test_cli_dry_run_leaves_manifest_untouched() {
    let project = setup_project(CONFIG);

    cli()
        .arg(project.path())
        .arg("--dry-run")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("<queries>"));

    assert_eq!(manifest_contents(project.path()), MANIFEST);
}

#[test]
fn test_cli_check_mode() {
    let project = setup_project(CONFIG);

    // Entries are missing at first
    cli().arg(project.path()).arg("--check").assert().failure();

    cli().arg(project.path()).assert().success();

    // After the merge the check passes
    cli().arg(project.path()).arg("--check").assert().success();
}

#[test]
fn test_cli_json_report() {
    let project = setup_project(CONFIG);

    cli()
        .arg(project.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_added\": 2"));
}

#[test]
fn test_cli_rejects_invalid_config_entry() {
    let project = setup_project("visibility:\n  - type: widget\n    name: test value\n");

    cli()
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not yet supported"));

    assert_eq!(manifest_contents(project.path()), MANIFEST);
}

#[test]
fn test_cli_explicit_manifest_flag() {
    let project = setup_project(CONFIG);
    let other = project.path().join("other/AndroidManifest.xml");
    fs::create_dir_all(other.parent().unwrap()).unwrap();
    fs::write(&other, MANIFEST).unwrap();

    cli()
        .arg(project.path())
        .arg("--manifest")
        .arg(&other)
        .assert()
        .success();

    assert!(fs::read_to_string(&other).unwrap().contains("<queries>"));
    assert_eq!(manifest_contents(project.path()), MANIFEST);
}
