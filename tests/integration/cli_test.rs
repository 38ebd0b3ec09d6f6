use crate::{fixture_path, fixture_paths};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `elm-deps` running in an empty directory with no user config in reach.
fn elm_deps(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("elm-deps").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("ELM_DEPS_FORMAT")
        .env_remove("ELM_DEPS_CHUNK_SIZE")
        .env_remove("ELM_DEPS_SOURCE_ROOTS");
    cmd
}

fn lines(paths: &[std::path::PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}

#[test]
fn resolve_text_lists_dependencies_in_order() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("Parent.elm");
    let expected = lines(&fixture_paths(&[
        "Test/ChildA.elm",
        "Test/ChildB.elm",
        "Native/Child.js",
    ]));
    elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--format", "text", "--quiet"])
        .assert()
        .success()
        .stdout(expected)
        .stderr(predicate::str::is_empty());
}

#[test]
fn resolve_json_is_an_array_of_paths() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("ParentWithNestedDeps.elm");
    let output = elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    let expected: Vec<String> = fixture_paths(&[
        "Test/ChildA.elm",
        "Test/Sample/NestedChild.elm",
        "Test/ChildB.elm",
        "Native/Child.js",
    ])
    .iter()
    .map(|p| p.display().to_string())
    .collect();
    assert_eq!(parsed, expected);
}

#[test]
fn resolve_dot_draws_import_edges() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("Parent.elm");
    elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--format", "dot", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph dependencies {"))
        .stdout(predicate::str::contains("label=\"Test.ChildA\""))
        .stdout(predicate::str::contains("label=\"Native.Child\""))
        .stdout(predicate::str::contains("Html").not());
}

#[test]
fn resolve_prints_summary_unless_quiet() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("Parent.elm");
    elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--format", "text"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved 3 dependencies"))
        .stderr(predicate::str::contains("(1 unreadable)"));
}

#[test]
fn resolve_small_chunks_give_same_result() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("ParentWithUnindentedMultilineComment.elm");
    let expected = lines(&fixture_paths(&[
        "Test/ChildA.elm",
        "Test/ChildB.elm",
        "Native/Child.js",
    ]));
    elm_deps(&home)
        .args([
            "resolve",
            entry.to_str().unwrap(),
            "--format",
            "text",
            "--chunk-size",
            "3",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn resolve_without_source_roots() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("ParentWithOtherSrcDeps.elm");
    elm_deps(&home)
        .args([
            "resolve",
            entry.to_str().unwrap(),
            "--format",
            "text",
            "--no-source-roots",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn format_from_env_var() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("other-src/OtherParent.elm");
    elm_deps(&home)
        .env("ELM_DEPS_FORMAT", "text")
        .args(["resolve", entry.to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout(lines(&fixture_paths(&["Test/ChildA.elm"])));
}

#[test]
fn cli_flag_beats_env_var() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("other-src/OtherParent.elm");
    elm_deps(&home)
        .env("ELM_DEPS_FORMAT", "dot")
        .args(["resolve", entry.to_str().unwrap(), "--format", "text", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph").not());
}

#[test]
fn invalid_module_declaration_fails() {
    let home = tempfile::tempdir().unwrap();
    let entry = home.path().join("Broken.elm");
    std::fs::write(&entry, "module \n\nimport Html\n").unwrap();
    elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntactically"));
}

#[test]
fn port_module_without_name_fails() {
    let home = tempfile::tempdir().unwrap();
    let entry = home.path().join("Broken.elm");
    std::fs::write(&entry, "port module\t\nimport Html\n").unwrap();
    elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--quiet"])
        .assert()
        .failure();
}

#[test]
fn bare_module_word_is_not_a_declaration() {
    let home = tempfile::tempdir().unwrap();
    let entry = home.path().join("Main.elm");
    std::fs::write(&entry, "module\n\nimport Html\n").unwrap();
    elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--format", "text", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_entry_fails() {
    let home = tempfile::tempdir().unwrap();
    elm_deps(&home)
        .args(["resolve", "/nonexistent/Main.elm", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn zero_chunk_size_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let entry = fixture_path("Parent.elm");
    elm_deps(&home)
        .args(["resolve", entry.to_str().unwrap(), "--chunk-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk_size"));
}
