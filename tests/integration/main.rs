mod cli_test;
mod config_test;
mod resolve_test;

use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn fixture_paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| fixture_path(n)).collect()
}
