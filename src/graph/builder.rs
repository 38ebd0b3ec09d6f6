use crate::graph::ir::{DepGraph, GraphEdge, GraphNode, NodeKind};
use crate::parse::ModuleLayout;
use crate::resolve::WalkReport;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Builds a DepGraph from import edges with node and edge deduplication.
pub struct GraphBuilder<'a> {
    graph: DepGraph,
    node_map: HashMap<PathBuf, petgraph::graph::NodeIndex>,
    base_dir: PathBuf,
    entry: PathBuf,
    layout: &'a ModuleLayout,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(entry: &Path, base_dir: &Path, layout: &'a ModuleLayout) -> Self {
        Self {
            graph: DepGraph::new(),
            node_map: HashMap::new(),
            base_dir: base_dir.to_path_buf(),
            entry: entry.to_path_buf(),
            layout,
        }
    }

    /// Graph of everything a walk discovered: the entry, every dependency,
    /// and every import edge between readable files.
    pub fn from_report(report: &WalkReport, layout: &'a ModuleLayout) -> DepGraph {
        let mut builder = Self::new(&report.entry, &report.base_dir, layout);
        builder.ensure_node(&report.entry);
        for dependency in &report.dependencies {
            builder.ensure_node(dependency);
        }
        for (from, to) in &report.edges {
            builder.add_import(from, to);
        }
        builder.build()
    }

    /// Get or create a node for the given file.
    fn ensure_node(&mut self, path: &Path) -> petgraph::graph::NodeIndex {
        if let Some(&idx) = self.node_map.get(path) {
            return idx;
        }
        let kind = if path == self.entry {
            NodeKind::Entry
        } else if self.layout.is_source_file(path) {
            NodeKind::Source
        } else {
            NodeKind::Native
        };
        let idx = self.graph.add_node(GraphNode {
            kind,
            path: path.to_path_buf(),
            name: module_name(path, &self.base_dir),
        });
        self.node_map.insert(path.to_path_buf(), idx);
        idx
    }

    /// Add one import of `to` by `from`.
    pub fn add_import(&mut self, from: &Path, to: &Path) {
        let source_idx = self.ensure_node(from);
        let target_idx = self.ensure_node(to);

        if let Some(edge_idx) = self.graph.find_edge(source_idx, target_idx) {
            self.graph[edge_idx].imports += 1;
        } else {
            self.graph
                .add_edge(source_idx, target_idx, GraphEdge { imports: 1 });
        }
    }

    /// Consume the builder and return the built graph.
    pub fn build(self) -> DepGraph {
        self.graph
    }
}

/// Dotted module name of `path` relative to `base_dir`, falling back to the
/// file stem for files outside it (e.g. under another source root).
fn module_name(path: &Path, base_dir: &Path) -> String {
    let relative = path.strip_prefix(base_dir).unwrap_or_else(|_| {
        path.file_name().map(Path::new).unwrap_or(path)
    });
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}
