use crate::parse::{ModuleLayout, ModuleName};
use crate::paths::normalize_path;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default project manifest file name.
pub const DEFAULT_MANIFEST: &str = "elm.json";

/// Alternate source roots consulted when a module is not found under the
/// current base directory.
pub trait SourceRoots {
    /// Every alternate root declared for `base_dir`, normalized. Lookup
    /// failures yield an empty list, never an error.
    fn source_directories(&self, base_dir: &Path) -> Vec<PathBuf>;

    /// Return a directory, other than `base_dir`, under which `module`'s file
    /// exists. `None` means "no override".
    fn override_for(
        &self,
        module: &ModuleName,
        base_dir: &Path,
        layout: &ModuleLayout,
    ) -> Option<PathBuf> {
        let base = normalize_path(base_dir);
        first_root_containing(&self.source_directories(&base), module, &base, layout)
    }
}

/// First of `roots`, skipping `base_dir` itself, that holds `module`'s file.
pub fn first_root_containing(
    roots: &[PathBuf],
    module: &ModuleName,
    base_dir: &Path,
    layout: &ModuleLayout,
) -> Option<PathBuf> {
    roots
        .iter()
        .filter(|dir| dir.as_path() != base_dir)
        .find(|dir| module.path_under(dir, layout).is_file())
        .cloned()
}

/// Never overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSourceRoots;

impl SourceRoots for NoSourceRoots {
    fn source_directories(&self, _: &Path) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Source roots declared in the `source-directories` key of the nearest
/// project manifest above the base directory.
#[derive(Debug, Clone)]
pub struct ManifestSourceRoots {
    manifest_name: String,
}

impl ManifestSourceRoots {
    pub fn new(manifest_name: impl Into<String>) -> Self {
        Self {
            manifest_name: manifest_name.into(),
        }
    }

    /// Walk up from `start` to the first directory containing the manifest.
    pub fn find_manifest(&self, start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(&self.manifest_name);
            if candidate.is_file() {
                return Some(candidate);
            }
            // A relative start bottoms out at the empty path, which joins as
            // the working directory; stop after checking it.
            if dir.as_os_str().is_empty() || !dir.pop() {
                break;
            }
        }
        None
    }

    /// Source directories listed by the nearest manifest, resolved against
    /// the manifest's directory. Empty when the manifest is missing,
    /// unreadable, malformed, or has no `source-directories` key.
    fn read_source_directories(&self, base_dir: &Path) -> Vec<PathBuf> {
        let Some(manifest_path) = self.find_manifest(base_dir) else {
            tracing::trace!("No {} above {}", self.manifest_name, base_dir.display());
            return Vec::new();
        };
        let content = match std::fs::read_to_string(&manifest_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("Ignoring unreadable {}: {}", manifest_path.display(), e);
                return Vec::new();
            }
        };
        let manifest = match parse_manifest(&content) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Ignoring malformed {}: {}", manifest_path.display(), e);
                return Vec::new();
            }
        };
        let root = manifest_path.parent().unwrap_or(Path::new("."));
        manifest
            .source_directories
            .unwrap_or_default()
            .iter()
            .map(|dir| normalize_path(&root.join(dir)))
            .collect()
    }
}

impl Default for ManifestSourceRoots {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST)
    }
}

impl SourceRoots for ManifestSourceRoots {
    fn source_directories(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.read_source_directories(base_dir)
    }
}

/// The subset of a project manifest this crate reads.
#[derive(Debug, Deserialize)]
struct ProjectManifest {
    #[serde(rename = "source-directories")]
    source_directories: Option<Vec<String>>,
}

fn parse_manifest(content: &str) -> Result<ProjectManifest, serde_json::Error> {
    serde_json::from_str(content)
}
