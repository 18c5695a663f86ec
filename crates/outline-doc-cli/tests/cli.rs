use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bin(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("outline-doc").expect("binary");
    cmd.current_dir(dir);
    cmd
}

#[test]
fn new_add_and_show_round_trip_through_the_store() {
    let temp = TempDir::new().expect("tempdir");

    bin(temp.path()).args(["new", "notes"]).assert().success();
    bin(temp.path())
        .args(["add-section", "notes", "intro"])
        .assert()
        .success();
    bin(temp.path())
        .args(["add-paragraph", "notes", "0", "hello world"])
        .assert()
        .success();

    bin(temp.path())
        .args(["show", "notes"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("intro").and(predicate::str::contains("hello world")),
        );

    assert!(temp.path().join(".outline/notes.json").exists());
}

#[test]
fn insert_at_front_reorders_sections() {
    let temp = TempDir::new().expect("tempdir");

    bin(temp.path()).args(["new", "notes"]).assert().success();
    bin(temp.path())
        .args(["add-section", "notes", "beta"])
        .assert()
        .success();
    bin(temp.path())
        .args(["add-section", "notes", "alpha", "--at", "0"])
        .assert()
        .success();

    let output = bin(temp.path())
        .args(["show", "notes"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("stdout utf8");
    assert!(stdout.find("alpha").unwrap() < stdout.find("beta").unwrap());
}

#[test]
fn mv_section_accepts_negative_offsets() {
    let temp = TempDir::new().expect("tempdir");

    bin(temp.path()).args(["new", "notes"]).assert().success();
    bin(temp.path())
        .args(["add-section", "notes", "alpha"])
        .assert()
        .success();
    bin(temp.path())
        .args(["add-section", "notes", "beta"])
        .assert()
        .success();
    bin(temp.path())
        .args(["mv-section", "notes", "1", "-1"])
        .assert()
        .success();

    let output = bin(temp.path())
        .args(["show", "notes"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("stdout utf8");
    assert!(stdout.find("beta").unwrap() < stdout.find("alpha").unwrap());
}

#[test]
fn out_of_range_index_fails_with_bounds_error() {
    let temp = TempDir::new().expect("tempdir");

    bin(temp.path()).args(["new", "notes"]).assert().success();
    bin(temp.path())
        .args(["rm-section", "notes", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn export_writes_rendered_html() {
    let temp = TempDir::new().expect("tempdir");

    bin(temp.path()).args(["new", "notes"]).assert().success();
    bin(temp.path())
        .args(["add-section", "notes", "intro"])
        .assert()
        .success();
    bin(temp.path())
        .args(["add-paragraph", "notes", "0", "hello *world*"])
        .assert()
        .success();
    bin(temp.path())
        .args(["export", "notes"])
        .assert()
        .success();

    let markup = fs::read_to_string(temp.path().join(".outline/notes.html")).expect("read html");
    assert!(markup.contains("<h1>notes</h1>"));
    assert!(markup.contains("<h2>intro</h2>"));
    assert!(markup.contains("<em>world</em>"));
}

#[test]
fn config_override_moves_the_storage_root() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join("docs.toml"),
        "[storage]\nroot = \"store\"\n",
    )
    .expect("write config");

    bin(temp.path())
        .args(["--config", "docs.toml", "new", "notes"])
        .assert()
        .success();

    assert!(temp.path().join("store/notes.json").exists());
    assert!(!temp.path().join(".outline").exists());
}

#[test]
fn clear_empties_the_document() {
    let temp = TempDir::new().expect("tempdir");

    bin(temp.path()).args(["new", "notes"]).assert().success();
    bin(temp.path())
        .args(["add-section", "notes", "intro"])
        .assert()
        .success();
    bin(temp.path()).args(["clear", "notes"]).assert().success();

    let stored = fs::read_to_string(temp.path().join(".outline/notes.json")).expect("read store");
    assert!(!stored.contains("intro"));
}
