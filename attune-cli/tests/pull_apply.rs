use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use attune_core::Layout;

fn attune_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("attune"));
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .expect("spawn git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// Initialize the store working copy under `home` with a test identity.
fn init_store(home: &Path) -> Layout {
    let layout = Layout::from_home(home);
    fs::create_dir_all(&layout.repo_root).expect("create store");
    git(
        &layout.repo_root,
        &["-c", "init.defaultBranch=main", "init", "--quiet"],
    );
    git(&layout.repo_root, &["config", "user.email", "tests@example.com"]);
    git(&layout.repo_root, &["config", "user.name", "Attune Tests"]);
    git(&layout.repo_root, &["config", "commit.gpgsign", "false"]);
    layout
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create parents");
    fs::write(path, content).expect("write file");
}

fn commit_all(layout: &Layout, message: &str) {
    git(&layout.repo_root, &["add", "--all"]);
    git(&layout.repo_root, &["commit", "--quiet", "--message", message]);
}

fn backup_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("read runtime root")
        .map(|entry| entry.expect("entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "bak"))
        .collect()
}

#[test]
fn fresh_device_pull_mirrors_store_exactly() {
    let home = TempDir::new().expect("home");
    let layout = init_store(home.path());
    write(&layout.repo_root, "skills/review/SKILL.md", "review skill");
    write(&layout.repo_root, "skills/notes/SKILL.md", "notes skill");
    write(&layout.repo_root, "plugins/hub/plugin.json", r#"{"name":"hub"}"#);
    write(&layout.repo_root, "servers/servers.json", r#"{"servers":{}}"#);
    write(&layout.repo_root, "settings/settings.json", r#"{"theme":"dark"}"#);
    commit_all(&layout, "seed");

    attune_cmd(home.path())
        .arg("pull")
        .assert()
        .success()
        .stdout(contains("pull complete"));

    let runtime = &layout.runtime_root;
    assert_eq!(
        fs::read_to_string(runtime.join("skills/review/SKILL.md")).expect("skill"),
        "review skill"
    );
    assert_eq!(
        fs::read_to_string(runtime.join("plugins/hub/plugin.json")).expect("plugin"),
        r#"{"name":"hub"}"#
    );
    assert_eq!(
        fs::read_to_string(runtime.join("servers.json")).expect("servers"),
        r#"{"servers":{}}"#
    );
    assert_eq!(
        fs::read_to_string(runtime.join("settings.json")).expect("settings"),
        r#"{"theme":"dark"}"#
    );
    assert!(
        backup_files(runtime).is_empty(),
        "fresh install must not create backups"
    );
}

#[test]
fn pull_backs_up_existing_settings_before_overwrite() {
    let home = TempDir::new().expect("home");
    let layout = init_store(home.path());
    write(&layout.repo_root, "settings/settings.json", r#"{"theme":"dark"}"#);
    commit_all(&layout, "seed");

    write(&layout.runtime_root, "settings.json", r#"{"theme":"light"}"#);

    attune_cmd(home.path())
        .arg("pull")
        .assert()
        .success()
        .stdout(contains("backup at"));

    assert_eq!(
        fs::read_to_string(layout.runtime_root.join("settings.json")).expect("settings"),
        r#"{"theme":"dark"}"#
    );
    let backups = backup_files(&layout.runtime_root);
    assert_eq!(backups.len(), 1, "exactly one backup expected");
    assert_eq!(
        fs::read_to_string(&backups[0]).expect("backup"),
        r#"{"theme":"light"}"#
    );
}

#[test]
fn pull_removes_runtime_entries_absent_from_store() {
    let home = TempDir::new().expect("home");
    let layout = init_store(home.path());
    write(&layout.repo_root, "skills/current/SKILL.md", "current");
    commit_all(&layout, "seed");

    write(&layout.runtime_root, "skills/obsolete/SKILL.md", "obsolete");

    attune_cmd(home.path()).arg("pull").assert().success();

    assert!(layout.runtime_root.join("skills/current/SKILL.md").exists());
    assert!(
        !layout.runtime_root.join("skills/obsolete").exists(),
        "extraneous runtime entries must be removed"
    );
}

#[test]
fn repeated_pull_is_idempotent_and_keeps_a_single_backup_slot() {
    let home = TempDir::new().expect("home");
    let layout = init_store(home.path());
    write(&layout.repo_root, "skills/review/SKILL.md", "review skill");
    write(&layout.repo_root, "settings/settings.json", r#"{"v":2}"#);
    commit_all(&layout, "seed");
    write(&layout.runtime_root, "settings.json", r#"{"v":1}"#);

    attune_cmd(home.path()).arg("pull").assert().success();
    attune_cmd(home.path()).arg("pull").assert().success();

    assert_eq!(
        fs::read_to_string(layout.runtime_root.join("settings.json")).expect("settings"),
        r#"{"v":2}"#
    );
    let backups = backup_files(&layout.runtime_root);
    assert_eq!(backups.len(), 1, "backup slot must not accumulate");
    // Second pull backed up the already-reconciled content.
    assert_eq!(
        fs::read_to_string(&backups[0]).expect("backup"),
        r#"{"v":2}"#
    );
}
