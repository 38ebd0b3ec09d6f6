use petgraph::graph::DiGraph;
use serde::Serialize;
use std::path::PathBuf;

/// The import graph of one resolution run.
pub type DepGraph = DiGraph<GraphNode, GraphEdge>;

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub kind: NodeKind,
    /// Normalized file path
    pub path: PathBuf,
    /// Module name relative to the base directory (e.g. "Css.Declarations")
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The file the walk started from
    Entry,
    /// A source-language module, scanned for imports
    Source,
    /// A native-interop module, never scanned
    Native,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    /// Number of import lines that produced this edge
    pub imports: usize,
}
