//! Error path integration tests: every fatal precondition produces one
//! descriptive error line and a non-zero exit, and leaves nothing behind.

mod common;

use assert_cmd::Command;
use common::TestBundle;
use predicates::prelude::*;

fn xapkit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("xapkit").unwrap();
    // keep the environment from supplying a real aapt
    cmd.env_remove("AAPT")
        .env_remove("ANDROID_SDK_ROOT")
        .env_remove("ANDROID_HOME");
    cmd
}

#[test]
fn test_build_nonexistent_directory() {
    xapkit_cmd()
        .args(["build", "/no/such/bundle/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error (resolve)"))
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_build_path_is_a_file() {
    let bundle = TestBundle::new();
    let file = bundle.write_file("base.apk", 10);

    xapkit_cmd()
        .arg("build")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_build_missing_base_package() {
    let bundle = TestBundle::new();
    bundle.write_file("main.1.com.example.app.obb", 10);

    xapkit_cmd()
        .arg("build")
        .arg(&bundle.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No base.apk found"));
}

#[test]
fn test_build_only_base_package() {
    let bundle = TestBundle::new();
    bundle.write_file("base.apk", 10);

    xapkit_cmd()
        .arg("build")
        .arg(&bundle.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No expansion or split-config files",
        ));
}

#[test]
fn test_build_only_base_fails_before_inspection() {
    // resolution fails before aapt is ever looked up, so the error is the
    // resolve one even though no aapt exists in this environment
    let bundle = TestBundle::new();
    bundle.write_file("base.apk", 10);

    xapkit_cmd()
        .arg("build")
        .arg(&bundle.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error (resolve)"))
        .stderr(predicate::str::contains("aapt").not());
}

#[test]
fn test_build_without_aapt_available() {
    let bundle = TestBundle::new();
    bundle.write_file("base.apk", 10);
    bundle.write_file("main.1.com.example.app.obb", 10);

    xapkit_cmd()
        .arg("build")
        .arg(&bundle.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error (inspect)"))
        .stderr(predicate::str::contains("aapt not found"));
}

#[test]
fn test_failed_build_leaves_no_archive() {
    let bundle = TestBundle::new();
    bundle.write_file("base.apk", 10);
    bundle.write_file("main.1.com.example.app.obb", 10);

    xapkit_cmd().arg("build").arg(&bundle.path).assert().failure();

    let leftovers: Vec<_> = std::fs::read_dir(&bundle.path)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "xapk"))
        .collect();
    assert!(leftovers.is_empty());
}
