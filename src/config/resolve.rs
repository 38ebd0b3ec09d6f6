use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{DepsError, Result};
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};

/// Name of the per-project config file.
pub const PROJECT_CONFIG: &str = ".elm-deps.toml";

/// Every setting `config show` reports.
pub const KEYS: [&str; 7] = [
    "defaults.format",
    "scanner.chunk_size",
    "resolver.source_extension",
    "resolver.native_extension",
    "resolver.native_prefix",
    "resolver.manifest",
    "resolver.source_roots",
];

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub chunk_size: Option<usize>,
    pub source_extension: Option<String>,
    pub native_extension: Option<String>,
    pub native_prefix: Option<String>,
    pub manifest: Option<String>,
    pub no_source_roots: bool,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/elm-deps/config.toml)
/// 3. Project config (nearest .elm-deps.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_config_from(working_dir, find_user_config().as_deref(), cli)
}

/// [`resolve_config`] with an explicit user config location.
pub fn resolve_config_from(
    working_dir: &Path,
    user_config: Option<&Path>,
    cli: &CliOverrides,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::with_defaults(&KEYS);
    let mut loaded_files = Vec::new();

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        let file_config = load_file_config(path, "user")?;
        apply_file_config(&mut config, &file_config, Source::UserConfig(path.to_path_buf()), &mut prov)?;
        loaded_files.push(path.to_path_buf());
    }

    if let Some(path) = find_project_config(working_dir) {
        let file_config = load_file_config(&path, "project")?;
        apply_file_config(&mut config, &file_config, Source::ProjectConfig(path.clone()), &mut prov)?;
        loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov)?;
    apply_cli_overrides(&mut config, cli, &mut prov);
    validate(&config)?;

    config.provenance = prov;
    config.loaded_files = loaded_files;
    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("elm-deps").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG);
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn load_file_config(path: &Path, kind: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        DepsError::Config(format!("Could not read {kind} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| DepsError::Config(format!("Invalid {kind} config {}: {e}", path.display())))
}

fn parse_format(value: &str, origin: &str) -> Result<OutputFormat> {
    value
        .parse()
        .map_err(|e| DepsError::Config(format!("{origin}: {e}")))
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(ref format) = file.defaults.format {
        config.format = parse_format(format, &source.to_string())?;
        prov.set("defaults.format", source.clone());
    }
    if let Some(chunk_size) = file.scanner.chunk_size {
        config.chunk_size = chunk_size;
        prov.set("scanner.chunk_size", source.clone());
    }

    let resolver = &file.resolver;
    if let Some(ref ext) = resolver.source_extension {
        config.layout.source_extension = trim_dot(ext);
        prov.set("resolver.source_extension", source.clone());
    }
    if let Some(ref ext) = resolver.native_extension {
        config.layout.native_extension = trim_dot(ext);
        prov.set("resolver.native_extension", source.clone());
    }
    if let Some(ref prefix) = resolver.native_prefix {
        config.layout.native_prefix = prefix.clone();
        prov.set("resolver.native_prefix", source.clone());
    }
    if let Some(ref manifest) = resolver.manifest {
        config.manifest = manifest.clone();
        prov.set("resolver.manifest", source.clone());
    }
    if let Some(source_roots) = resolver.source_roots {
        config.source_roots = source_roots;
        prov.set("resolver.source_roots", source);
    }
    Ok(())
}

fn apply_env_vars(config: &mut ResolvedConfig, prov: &mut ProvenanceMap) -> Result<()> {
    if let Ok(val) = std::env::var("ELM_DEPS_FORMAT") {
        config.format = parse_format(&val, "ELM_DEPS_FORMAT")?;
        prov.set("defaults.format", Source::EnvVar("ELM_DEPS_FORMAT".into()));
    }
    if let Ok(val) = std::env::var("ELM_DEPS_CHUNK_SIZE") {
        config.chunk_size = val.trim().parse().map_err(|_| {
            DepsError::Config(format!("ELM_DEPS_CHUNK_SIZE: not a number: {val}"))
        })?;
        prov.set("scanner.chunk_size", Source::EnvVar("ELM_DEPS_CHUNK_SIZE".into()));
    }
    if let Ok(val) = std::env::var("ELM_DEPS_SOURCE_EXTENSION") {
        config.layout.source_extension = trim_dot(&val);
        prov.set(
            "resolver.source_extension",
            Source::EnvVar("ELM_DEPS_SOURCE_EXTENSION".into()),
        );
    }
    if let Ok(val) = std::env::var("ELM_DEPS_NATIVE_EXTENSION") {
        config.layout.native_extension = trim_dot(&val);
        prov.set(
            "resolver.native_extension",
            Source::EnvVar("ELM_DEPS_NATIVE_EXTENSION".into()),
        );
    }
    if let Ok(val) = std::env::var("ELM_DEPS_NATIVE_PREFIX") {
        config.layout.native_prefix = val;
        prov.set(
            "resolver.native_prefix",
            Source::EnvVar("ELM_DEPS_NATIVE_PREFIX".into()),
        );
    }
    if let Ok(val) = std::env::var("ELM_DEPS_MANIFEST") {
        config.manifest = val;
        prov.set("resolver.manifest", Source::EnvVar("ELM_DEPS_MANIFEST".into()));
    }
    if let Ok(val) = std::env::var("ELM_DEPS_SOURCE_ROOTS") {
        config.source_roots = val == "1" || val.eq_ignore_ascii_case("true");
        prov.set(
            "resolver.source_roots",
            Source::EnvVar("ELM_DEPS_SOURCE_ROOTS".into()),
        );
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("defaults.format", Source::CliFlag("--format".into()));
    }
    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
        prov.set("scanner.chunk_size", Source::CliFlag("--chunk-size".into()));
    }
    if let Some(ref ext) = cli.source_extension {
        config.layout.source_extension = trim_dot(ext);
        prov.set(
            "resolver.source_extension",
            Source::CliFlag("--source-extension".into()),
        );
    }
    if let Some(ref ext) = cli.native_extension {
        config.layout.native_extension = trim_dot(ext);
        prov.set(
            "resolver.native_extension",
            Source::CliFlag("--native-extension".into()),
        );
    }
    if let Some(ref prefix) = cli.native_prefix {
        config.layout.native_prefix = prefix.clone();
        prov.set("resolver.native_prefix", Source::CliFlag("--native-prefix".into()));
    }
    if let Some(ref manifest) = cli.manifest {
        config.manifest = manifest.clone();
        prov.set("resolver.manifest", Source::CliFlag("--manifest".into()));
    }
    if cli.no_source_roots {
        config.source_roots = false;
        prov.set(
            "resolver.source_roots",
            Source::CliFlag("--no-source-roots".into()),
        );
    }
}

/// Extensions are stored without a leading dot.
fn trim_dot(ext: &str) -> String {
    ext.trim_start_matches('.').to_string()
}

fn validate(config: &ResolvedConfig) -> Result<()> {
    if config.chunk_size == 0 {
        return Err(DepsError::Config("scanner.chunk_size must be at least 1".into()));
    }
    if config.layout.source_extension.is_empty() {
        return Err(DepsError::Config("resolver.source_extension must not be empty".into()));
    }
    if config.layout.native_extension.is_empty() {
        return Err(DepsError::Config("resolver.native_extension must not be empty".into()));
    }
    if config.layout.native_prefix.is_empty() {
        return Err(DepsError::Config("resolver.native_prefix must not be empty".into()));
    }
    if config.manifest.is_empty() {
        return Err(DepsError::Config("resolver.manifest must not be empty".into()));
    }
    Ok(())
}
