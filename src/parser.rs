use crate::ir::{Edge, EdgeVariant, Graph, GraphKind, NodeKind};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid graph document: {0}")]
    Syntax(#[from] json5::Error),
    #[error("unknown graph kind {0:?} (expected \"flow\" or \"dependency\")")]
    UnknownKind(String),
    #[error("node {id:?}: unknown type {kind:?}")]
    UnknownNodeKind { id: String, kind: String },
    #[error("edge {from:?} -> {to:?}: unknown variant {variant:?}")]
    UnknownEdgeVariant {
        from: String,
        to: String,
        variant: String,
    },
    #[error("graph document has no nodes array")]
    Empty,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphFile {
    kind: String,
    nodes: Option<Vec<NodeRecord>>,
    edges: Option<Vec<EdgeRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    id: String,
    label: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    connector: Option<String>,
    files: Option<u32>,
    ideas: Option<u32>,
    apis: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdgeRecord {
    source: String,
    target: String,
    label: Option<String>,
    #[serde(rename = "type")]
    variant: Option<String>,
    weight: Option<f32>,
}

/// Parse a JSON5 graph document into the IR.
///
/// Edges referencing ids absent from the node list are kept: the layout
/// stage skips them silently, matching the caller-side lookup-miss
/// behavior the renderer relies on.
pub fn parse_graph(input: &str) -> Result<Graph, ParseError> {
    let file: GraphFile = json5::from_str(input)?;
    let kind = GraphKind::from_token(&file.kind)
        .ok_or_else(|| ParseError::UnknownKind(file.kind.clone()))?;

    let records = file.nodes.ok_or(ParseError::Empty)?;
    let mut graph = Graph::new(kind);

    for record in records {
        let node_kind = match record.kind.as_deref() {
            Some(token) => Some(NodeKind::from_token(token).ok_or_else(|| {
                ParseError::UnknownNodeKind {
                    id: record.id.clone(),
                    kind: token.to_string(),
                }
            })?),
            None => match kind {
                GraphKind::Dependency => Some(NodeKind::Context),
                GraphKind::Flow => None,
            },
        };
        graph.ensure_node(&record.id, record.label, node_kind);
        let node = graph.nodes.get_mut(&record.id).expect("node just inserted");
        if record.connector.is_some() {
            node.connector = record.connector;
        }
        if let Some(files) = record.files {
            node.files = files;
        }
        if let Some(ideas) = record.ideas {
            node.ideas = ideas;
        }
        if let Some(apis) = record.apis {
            node.apis = apis;
        }
    }

    for record in file.edges.unwrap_or_default() {
        let variant = match record.variant.as_deref() {
            Some(token) => EdgeVariant::from_token(token).ok_or_else(|| {
                ParseError::UnknownEdgeVariant {
                    from: record.source.clone(),
                    to: record.target.clone(),
                    variant: token.to_string(),
                }
            })?,
            None => EdgeVariant::Default,
        };
        graph.edges.push(Edge {
            from: record.source,
            to: record.target,
            label: record.label,
            variant,
            weight: record.weight.unwrap_or(1.0),
        });
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flow_document() {
        let input = r#"{
            kind: "flow",
            nodes: [
                { id: "a", label: "Trigger", type: "start" },
                { id: "b", label: "Run tool", type: "action" },
            ],
            edges: [
                { source: "a", target: "b", label: "fires" },
            ],
        }"#;
        let graph = parse_graph(input).unwrap();
        assert_eq!(graph.kind, GraphKind::Flow);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes["a"].kind, NodeKind::Start);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].label.as_deref(), Some("fires"));
    }

    #[test]
    fn dependency_nodes_default_to_context() {
        let input = r#"{
            "kind": "dependency",
            "nodes": [{ "id": "ctx", "files": 4, "ideas": 2, "apis": 1 }],
            "edges": []
        }"#;
        let graph = parse_graph(input).unwrap();
        assert_eq!(graph.nodes["ctx"].kind, NodeKind::Context);
        assert_eq!(graph.nodes["ctx"].size_metric(), 7);
    }

    #[test]
    fn unknown_node_type_is_rejected() {
        let input = r#"{ "kind": "flow", "nodes": [{ "id": "x", "type": "widget" }] }"#;
        let err = parse_graph(input).unwrap_err();
        assert!(matches!(err, ParseError::UnknownNodeKind { .. }));
    }

    #[test]
    fn keeps_edges_with_missing_endpoints() {
        let input = r#"{
            "kind": "flow",
            "nodes": [{ "id": "a", "type": "start" }],
            "edges": [{ "source": "a", "target": "ghost" }]
        }"#;
        let graph = parse_graph(input).unwrap();
        assert_eq!(graph.edges.len(), 1);
        assert!(!graph.nodes.contains_key("ghost"));
    }

    #[test]
    fn unknown_edge_variant_is_rejected() {
        let input = r#"{
            "kind": "flow",
            "nodes": [{ "id": "a" }, { "id": "b" }],
            "edges": [{ "source": "a", "target": "b", "type": "maybe" }]
        }"#;
        let err = parse_graph(input).unwrap_err();
        assert!(matches!(err, ParseError::UnknownEdgeVariant { .. }));
    }
}
