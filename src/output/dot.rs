use crate::errors::Result;
use crate::graph::ir::{DepGraph, NodeKind};
use std::io::Write;

/// Write the import graph in Graphviz DOT format.
pub fn write_dot<W: Write>(writer: &mut W, graph: &DepGraph) -> Result<()> {
    writeln!(writer, "digraph dependencies {{")?;
    writeln!(writer, "    rankdir=LR;")?;
    writeln!(writer, "    node [shape=box, style=filled];")?;
    writeln!(writer)?;

    for idx in graph.node_indices() {
        let node = &graph[idx];
        let fill = match node.kind {
            NodeKind::Entry => "gold",
            NodeKind::Source => "lightblue",
            NodeKind::Native => "lightgrey",
        };
        writeln!(
            writer,
            "    \"{}\" [label=\"{}\", fillcolor={}];",
            escape(&node.path.display().to_string()),
            escape(&node.name),
            fill
        )?;
    }
    writeln!(writer)?;

    for edge in graph.edge_indices() {
        let Some((source, target)) = graph.edge_endpoints(edge) else {
            continue;
        };
        let from = escape(&graph[source].path.display().to_string());
        let to = escape(&graph[target].path.display().to_string());
        let imports = graph[edge].imports;
        if imports > 1 {
            writeln!(writer, "    \"{from}\" -> \"{to}\" [label=\"{imports} imports\"];")?;
        } else {
            writeln!(writer, "    \"{from}\" -> \"{to}\";")?;
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
