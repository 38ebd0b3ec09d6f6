use crate::paths::normalize_path;
use std::fmt;
use std::path::{Path, PathBuf};

/// Naming rules that map a module name to a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    /// Extension of source-language modules, without the dot.
    pub source_extension: String,
    /// Extension of native-interop modules, without the dot.
    pub native_extension: String,
    /// Module-name prefix that marks a native-interop module.
    pub native_prefix: String,
}

impl Default for ModuleLayout {
    fn default() -> Self {
        Self {
            source_extension: "elm".to_string(),
            native_extension: "js".to_string(),
            native_prefix: "Native.".to_string(),
        }
    }
}

impl ModuleLayout {
    /// True if `path` carries the source extension, i.e. it can be scanned
    /// for further imports.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == self.source_extension)
    }
}

/// A dotted logical module name such as `Css.Declarations`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    /// Extract the module name from a raw import line.
    ///
    /// The line must start with `import` followed by whitespace; the module
    /// name is the next whitespace-free token. Anything after it (`as`,
    /// `exposing`) is ignored.
    pub fn from_import_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("import")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        rest.split_whitespace()
            .next()
            .map(|name| ModuleName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_native(&self, layout: &ModuleLayout) -> bool {
        self.0.starts_with(&layout.native_prefix)
    }

    /// Relative file path for this module: segments become directories and
    /// the namespace picks the extension (`Css.Declarations` ->
    /// `Css/Declarations.elm`, `Native.Child` -> `Native/Child.js`).
    pub fn relative_path(&self, layout: &ModuleLayout) -> PathBuf {
        let extension = if self.is_native(layout) {
            &layout.native_extension
        } else {
            &layout.source_extension
        };
        let mut path: PathBuf = self.0.split('.').collect();
        let file_name = format!(
            "{}.{}",
            path.file_name().and_then(|n| n.to_str()).unwrap_or_default(),
            extension
        );
        path.set_file_name(file_name);
        path
    }

    /// Candidate path of this module under `base_dir`, normalized.
    pub fn path_under(&self, base_dir: &Path, layout: &ModuleLayout) -> PathBuf {
        normalize_path(&base_dir.join(self.relative_path(layout)))
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a raw import line to its candidate path under `base_dir`.
/// Returns `None` when the line is not an import.
pub fn resolve_import(line: &str, base_dir: &Path, layout: &ModuleLayout) -> Option<PathBuf> {
    ModuleName::from_import_line(line).map(|module| module.path_under(base_dir, layout))
}
