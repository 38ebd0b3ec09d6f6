use crate::errors::Result;
use crate::manifest::{first_root_containing, ManifestSourceRoots, NoSourceRoots, SourceRoots};
use crate::parse::reader::DEFAULT_CHUNK_SIZE;
use crate::parse::{base_dir, scan_imports, ModuleLayout, ModuleName, ScanOutcome};
use crate::paths::normalize_path;
use crate::resolve::known::KnownDependencies;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Accumulator threaded through one resolution run.
///
/// Each recursive step takes it by value and hands back the updated copy.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Dependencies found so far, in discovery order.
    pub known: KnownDependencies,
    /// Files already scanned for imports.
    pub visited: HashSet<PathBuf>,
    /// Files that could not be read. Never part of the result.
    pub unreadable: HashSet<PathBuf>,
    /// `(importer, dependency)` for every resolved import of a scanned file.
    pub edges: Vec<(PathBuf, PathBuf)>,
    /// Alternate source roots already looked up, by base directory.
    pub source_dirs: HashMap<PathBuf, Vec<PathBuf>>,
}

impl Resolution {
    /// Seed a run with already-known dependencies and already-visited files.
    pub fn seeded(known: &[PathBuf], visited: &[PathBuf]) -> Self {
        Self {
            known: known.iter().cloned().collect(),
            visited: visited.iter().map(|p| normalize_path(p)).collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    /// The file was scanned (or had already been scanned).
    Resolved,
    /// The file could not be read; its path must be left out of the result.
    Unreadable,
}

/// Outcome of resolving one file.
#[derive(Debug, Clone)]
pub struct Visit {
    pub file: PathBuf,
    pub status: VisitStatus,
    pub resolution: Resolution,
}

/// Everything learned from walking an entry file.
#[derive(Debug, Clone)]
pub struct WalkReport {
    pub entry: PathBuf,
    pub base_dir: PathBuf,
    /// Resolved dependencies in discovery order, unreadable files excluded.
    pub dependencies: Vec<PathBuf>,
    /// Import edges between readable files, in discovery order.
    pub edges: Vec<(PathBuf, PathBuf)>,
    /// Files that were reached but could not be read, sorted.
    pub unreadable: Vec<PathBuf>,
}

/// Recursive import resolver.
pub struct DependencyWalker {
    layout: ModuleLayout,
    chunk_size: usize,
    source_roots: Box<dyn SourceRoots>,
}

impl DependencyWalker {
    /// Walker with the default layout, chunk size, and `elm.json` source roots.
    pub fn new() -> Self {
        Self {
            layout: ModuleLayout::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            source_roots: Box::new(ManifestSourceRoots::default()),
        }
    }

    pub fn with_layout(mut self, layout: ModuleLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_source_roots(mut self, source_roots: impl SourceRoots + 'static) -> Self {
        self.source_roots = Box::new(source_roots);
        self
    }

    pub fn without_source_roots(self) -> Self {
        self.with_source_roots(NoSourceRoots)
    }

    pub fn layout(&self) -> &ModuleLayout {
        &self.layout
    }

    /// Walk `entry`, asking the module declaration for the base directory
    /// when none is given.
    pub fn walk(&self, entry: &Path, base: Option<&Path>) -> Result<WalkReport> {
        self.walk_seeded(entry, base, Resolution::default())
    }

    /// Walk `entry` starting from a pre-seeded accumulator.
    pub fn walk_seeded(
        &self,
        entry: &Path,
        base: Option<&Path>,
        seed: Resolution,
    ) -> Result<WalkReport> {
        let entry = normalize_path(entry);

        if seed.visited.contains(&entry) {
            tracing::debug!("{} already visited", entry.display());
            return Ok(report(entry, base.map(normalize_path).unwrap_or_default(), seed));
        }

        let base = match base {
            Some(dir) => normalize_path(dir),
            None => base_dir(&entry)?,
        };
        tracing::debug!(
            entry = %entry.display(),
            base_dir = %base.display(),
            "resolving dependencies"
        );

        let visit = self.resolve(&entry, &base, seed);
        if visit.status == VisitStatus::Unreadable {
            tracing::debug!("Entry {} could not be read", entry.display());
        }
        Ok(report(entry, base, visit.resolution))
    }

    /// Resolve the imports of `file` against `base`, recursing into every
    /// newly discovered source module.
    pub fn resolve(&self, file: &Path, base: &Path, mut resolution: Resolution) -> Visit {
        let file = normalize_path(file);

        if !resolution.visited.insert(file.clone()) {
            return Visit {
                file,
                status: VisitStatus::Resolved,
                resolution,
            };
        }

        let unreadable_before = resolution.unreadable.len();
        let lines = match scan_imports(&file, self.chunk_size) {
            ScanOutcome::Imports(lines) => lines,
            ScanOutcome::Unreadable => {
                return Visit {
                    file,
                    status: VisitStatus::Unreadable,
                    resolution,
                }
            }
        };

        let mut discovered = Vec::new();
        for line in &lines {
            let Some(module) = ModuleName::from_import_line(line) else {
                tracing::trace!(line = line.as_str(), "not an import");
                continue;
            };
            let dependency = self.candidate_for(&module, base, &mut resolution);
            if resolution.unreadable.contains(&dependency) {
                continue;
            }
            resolution.edges.push((file.clone(), dependency.clone()));
            if resolution.known.insert(dependency.clone()) {
                discovered.push(dependency);
            }
        }
        tracing::debug!(
            file = %file.display(),
            imports = lines.len(),
            new = discovered.len(),
            "scanned"
        );

        for dependency in discovered {
            if !self.layout.is_source_file(&dependency) {
                continue;
            }
            let mut visit = self.resolve(&dependency, base, resolution);
            if visit.status == VisitStatus::Unreadable {
                tracing::debug!("Excluding unreadable {}", visit.file.display());
                visit.resolution.unreadable.insert(visit.file);
            }
            resolution = visit.resolution;
        }

        if resolution.unreadable.len() > unreadable_before {
            resolution.known.exclude(&resolution.unreadable);
        }

        Visit {
            file,
            status: VisitStatus::Resolved,
            resolution,
        }
    }

    /// Path of `module` under `base`, or under an alternate source root when
    /// it does not exist there. Source roots are looked up once per base
    /// directory and run.
    fn candidate_for(
        &self,
        module: &ModuleName,
        base: &Path,
        resolution: &mut Resolution,
    ) -> PathBuf {
        let candidate = module.path_under(base, &self.layout);
        if candidate.is_file() {
            return candidate;
        }
        let roots = resolution
            .source_dirs
            .entry(base.to_path_buf())
            .or_insert_with(|| self.source_roots.source_directories(base));
        match first_root_containing(roots, module, base, &self.layout) {
            Some(root) => {
                tracing::trace!(module = module.as_str(), root = %root.display(), "source root override");
                module.path_under(&root, &self.layout)
            }
            None => candidate,
        }
    }
}

impl Default for DependencyWalker {
    fn default() -> Self {
        Self::new()
    }
}

fn report(entry: PathBuf, base_dir: PathBuf, mut resolution: Resolution) -> WalkReport {
    resolution.known.exclude(&resolution.unreadable);
    let unreadable_set = &resolution.unreadable;
    let edges = resolution
        .edges
        .into_iter()
        .filter(|(from, to)| !unreadable_set.contains(from) && !unreadable_set.contains(to))
        .collect();
    let mut unreadable: Vec<PathBuf> = resolution.unreadable.iter().cloned().collect();
    unreadable.sort();
    WalkReport {
        entry,
        base_dir,
        dependencies: resolution.known.into_vec(),
        edges,
        unreadable,
    }
}
