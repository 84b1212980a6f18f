mod flow;
mod force;
pub(crate) mod types;
pub use types::*;
use flow::*;
use force::*;

use crate::config::LayoutConfig;
use crate::ir::{Graph, GraphKind};

/// Compute node positions for a graph. Total: every well-typed input
/// yields exactly one finite position per node, and a fresh position
/// map is allocated on every call.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig, width: f32, height: f32) -> Layout {
    match graph.kind {
        GraphKind::Flow => compute_flow_layout(graph, config),
        GraphKind::Dependency => compute_force_layout(graph, config, width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_yields_empty_layout() {
        for kind in [GraphKind::Flow, GraphKind::Dependency] {
            let graph = Graph::new(kind);
            let layout = compute_layout(&graph, &LayoutConfig::default(), 800.0, 600.0);
            assert!(layout.nodes.is_empty());
            assert!(layout.edges.is_empty());
            assert!(layout.positions().is_empty());
        }
    }
}
