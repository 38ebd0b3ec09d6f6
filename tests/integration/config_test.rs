use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn config_show(home: &TempDir, dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("elm-deps").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("ELM_DEPS_FORMAT")
        .env_remove("ELM_DEPS_CHUNK_SIZE")
        .args(["config", "show", "--path", dir.to_str().unwrap()]);
    cmd
}

#[test]
fn config_show_defaults() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    config_show(&home, project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("defaults.format: json <- default"))
        .stdout(predicate::str::contains("scanner.chunk_size: 480 <- default"))
        .stdout(predicate::str::contains("resolver.source_extension: elm <- default"))
        .stdout(predicate::str::contains("resolver.native_extension: js <- default"))
        .stdout(predicate::str::contains("resolver.manifest: elm.json <- default"));
}

#[test]
fn config_show_with_project_config() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    std::fs::write(
        project.path().join(".elm-deps.toml"),
        r#"
[defaults]
format = "text"

[scanner]
chunk_size = 64

[resolver]
source_roots = false
"#,
    )
    .unwrap();

    config_show(&home, project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".elm-deps.toml"))
        .stdout(predicate::str::contains("defaults.format: text <- project config"))
        .stdout(predicate::str::contains("scanner.chunk_size: 64 <- project config"))
        .stdout(predicate::str::contains("resolver.source_roots: false <- project config"))
        .stdout(predicate::str::contains("resolver.native_prefix: Native. <- default"));
}

#[test]
fn config_show_env_var_beats_project_config() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    std::fs::write(
        project.path().join(".elm-deps.toml"),
        "[defaults]\nformat = \"text\"\n",
    )
    .unwrap();

    config_show(&home, project.path())
        .env("ELM_DEPS_FORMAT", "dot")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.format: dot <- env var (ELM_DEPS_FORMAT)",
        ));
}

#[test]
fn config_show_rejects_unknown_keys() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    std::fs::write(
        project.path().join(".elm-deps.toml"),
        "[resolver]\nsource_dirs = [\"src\"]\n",
    )
    .unwrap();

    config_show(&home, project.path()).assert().failure();
}

#[test]
fn config_show_bad_path() {
    let home = tempfile::tempdir().unwrap();
    config_show(&home, std::path::Path::new("/nonexistent/project"))
        .assert()
        .failure();
}
