use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub kind: String,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub levels: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub level: Option<usize>,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub variant: String,
    pub weight: f32,
    pub label: Option<String>,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .values()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: format!("{:?}", node.kind),
                x: node.x,
                y: node.y,
                radius: node.radius,
                level: node.level,
                label: node.label.clone(),
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                variant: format!("{:?}", edge.variant),
                weight: edge.weight,
                label: edge.label.clone(),
                points: edge.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        LayoutDump {
            kind: format!("{:?}", layout.kind),
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
            levels: layout.levels.clone(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
