// tests/cli_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use git2::Repository;
use tempfile::TempDir;

fn git_branchguard(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_git-branchguard"))
        .args(args)
        .current_dir(dir)
        .env("USER", "cli-tester")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn repo_on(branch: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    repo.set_head(&format!("refs/heads/{}", branch)).unwrap();
    dir
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = git_branchguard(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("validate-branch"));
    assert!(stdout.contains("prepare-release"));
}

#[test]
fn test_validate_branch_recognized() {
    let dir = repo_on("hotfix/t123-auth-bug");
    let output = git_branchguard(dir.path(), &["validate-branch"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Valid hotfix branch: hotfix/t123-auth-bug"));
    assert!(stdout.contains("Emergency fix branch"));
}

#[test]
fn test_validate_branch_dirty_tree_still_succeeds() {
    let dir = repo_on("dev");
    fs::write(dir.path().join("scratch.txt"), "wip").unwrap();
    let output = git_branchguard(dir.path(), &["validate-branch"]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("uncommitted changes"));
}

#[test]
fn test_stray_settings_file_has_no_effect() {
    let dir = repo_on("dev");
    fs::write(
        dir.path().join("branchguard.toml"),
        "[behavior\nwarn_on_dirty = false\n",
    )
    .unwrap();
    let output = git_branchguard(dir.path(), &["validate-branch"]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("uncommitted changes"));
}

#[test]
fn test_config_flag_is_rejected() {
    let dir = repo_on("dev");
    let output = git_branchguard(dir.path(), &["--config", "x.toml", "validate-branch"]);
    assert!(!output.status.success());
}

#[test]
fn test_validate_branch_unrecognized() {
    let dir = repo_on("my-experiment");
    let output = git_branchguard(dir.path(), &["validate-branch"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid branch name: my-experiment"));
    assert!(stderr.contains("release/DDMMYY[-n]-description"));
}

#[test]
fn test_validate_branch_outside_repository() {
    let dir = TempDir::new().unwrap();
    let output = git_branchguard(dir.path(), &["validate-branch"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_prepare_release_missing_version() {
    let dir = TempDir::new().unwrap();
    let output = git_branchguard(dir.path(), &["prepare-release"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage:"));
}

#[test]
fn test_prepare_release_invalid_version() {
    let dir = TempDir::new().unwrap();
    let output = git_branchguard(dir.path(), &["prepare-release", "2.1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("X.Y.Z"));
}

#[test]
fn test_prepare_release_wrong_branch() {
    let dir = repo_on("main");
    let output = git_branchguard(dir.path(), &["prepare-release", "2.1.0", "New payments"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("git checkout -b release/"));
    assert!(stderr.contains("-new-payments"));
    assert!(!dir.path().join("release.json").exists());
}

#[test]
fn test_prepare_release_writes_and_commits() {
    let dir = repo_on("release/091025-payments");
    let output = git_branchguard(dir.path(), &["prepare-release", "2.1.0", "Payments"]);

    assert_eq!(output.status.code(), Some(0));
    let text = fs::read_to_string(dir.path().join("release.json")).unwrap();
    assert!(text.contains("\"version\": \"2.1.0\""));
    assert!(text.contains("\"preparedBy\": \"cli-tester\""));
    assert!(text.ends_with("}\n"));

    let repo = Repository::open(dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.summary(), Some("chore: prepare release 2.1.0"));

    // preparedAt always changes, so a rerun has something to commit
    let output = git_branchguard(dir.path(), &["prepare-release", "2.1.0", "Payments"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_build_info_reads_descriptor() {
    let dir = repo_on("release/091025-payments");
    git_branchguard(dir.path(), &["prepare-release", "3.4.5"]);

    let output = Command::new(env!("CARGO_BIN_EXE_git-branchguard"))
        .arg("build-info")
        .current_dir(dir.path())
        .env("BUILD_NUMBER", "101")
        .env_remove("BRANCH_NAME")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["version"], "3.4.5");
    assert_eq!(info["minor"], 4);
    assert_eq!(info["build"], "101");
    assert_eq!(info["branch"], "local");
}
