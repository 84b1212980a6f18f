use crate::ir::{EdgeVariant, GraphKind, NodeKind};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub x: f32,
    pub y: f32,
    /// Rendered radius for dependency nodes; half the node width works
    /// as a stand-in for flow nodes.
    pub radius: f32,
    /// Level index for the layered variant; None for force layouts.
    pub level: Option<usize>,
    pub kind: NodeKind,
    pub label: String,
    pub connector: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub variant: EdgeVariant,
    pub weight: f32,
    pub points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub kind: GraphKind,
    pub nodes: BTreeMap<String, NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    /// Ordered level membership for the layered variant; empty for
    /// force layouts.
    pub levels: Vec<Vec<String>>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    /// Position map in the shape the rendering surface consumes:
    /// exactly one entry per laid-out node.
    pub fn positions(&self) -> BTreeMap<String, (f32, f32)> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), (node.x, node.y)))
            .collect()
    }
}
