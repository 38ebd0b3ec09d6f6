pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::manifest::{ManifestSourceRoots, DEFAULT_MANIFEST};
use crate::output::OutputFormat;
use crate::parse::reader::DEFAULT_CHUNK_SIZE;
use crate::parse::ModuleLayout;
use crate::resolve::DependencyWalker;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Fully resolved configuration with every layer applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Output
    pub format: OutputFormat,

    // Scanner
    pub chunk_size: usize,

    // Resolver
    pub layout: ModuleLayout,
    pub manifest: String,
    pub source_roots: bool,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            layout: ModuleLayout::default(),
            manifest: DEFAULT_MANIFEST.to_string(),
            source_roots: true,
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// A walker configured from these settings.
    pub fn walker(&self) -> DependencyWalker {
        let walker = DependencyWalker::new()
            .with_layout(self.layout.clone())
            .with_chunk_size(self.chunk_size);
        if self.source_roots {
            walker.with_source_roots(ManifestSourceRoots::new(self.manifest.clone()))
        } else {
            walker.without_source_roots()
        }
    }
}
