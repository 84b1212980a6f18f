use crate::config::LayoutConfig;
use crate::ir::{Graph, NodeKind};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::{EdgeLayout, Layout, NodeLayout};

/// Layered layout for flow diagrams: BFS layering from start nodes,
/// barycenter crossing reduction, then dynamic spacing centered on x = 0.
pub(super) fn compute_flow_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    let ids = graph.ordered_node_ids();
    if ids.is_empty() {
        return Layout {
            kind: graph.kind,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            levels: Vec::new(),
            width: 0.0,
            height: 0.0,
        };
    }

    let mut levels = assign_levels(graph, &ids);
    order_levels(graph, &mut levels, config.flow.order_passes);

    let flow = &config.flow;
    let mut nodes: BTreeMap<String, NodeLayout> = BTreeMap::new();
    let mut max_span = 0.0f32;
    for (level_idx, level) in levels.iter().enumerate() {
        let count = level.len();
        let y = level_idx as f32 * flow.level_gap;
        let step = if count > 1 {
            let gap = ((flow.target_width - count as f32 * flow.node_width)
                / (count as f32 - 1.0))
                .clamp(flow.min_gap, flow.max_gap);
            flow.node_width + gap
        } else {
            0.0
        };
        let span = step * (count as f32 - 1.0).max(0.0);
        max_span = max_span.max(span);
        for (idx, id) in level.iter().enumerate() {
            let node = &graph.nodes[id];
            nodes.insert(
                id.clone(),
                NodeLayout {
                    id: id.clone(),
                    x: idx as f32 * step - span / 2.0,
                    y,
                    radius: flow.node_width / 2.0,
                    level: Some(level_idx),
                    kind: node.kind,
                    label: node.label.clone(),
                    connector: node.connector.clone(),
                },
            );
        }
    }

    let mut edges = Vec::new();
    for edge in &graph.edges {
        let (Some(from), Some(to)) = (nodes.get(&edge.from), nodes.get(&edge.to)) else {
            continue;
        };
        edges.push(EdgeLayout {
            from: edge.from.clone(),
            to: edge.to.clone(),
            label: edge.label.clone(),
            variant: edge.variant,
            weight: edge.weight,
            points: vec![(from.x, from.y), (to.x, to.y)],
        });
    }

    let width = max_span + flow.node_width + flow.min_gap;
    let height = (levels.len().saturating_sub(1)) as f32 * flow.level_gap + flow.level_gap;

    Layout {
        kind: graph.kind,
        nodes,
        edges,
        levels,
        width,
        height,
    }
}

/// Partition nodes into BFS levels. Seeds are `start`-typed nodes, then
/// in-degree-zero nodes, then — for a fully cyclic graph — the first
/// node in input order, an order-dependent fallback kept on purpose.
/// Nodes the BFS never reaches form one final level in input order.
fn assign_levels(graph: &Graph, ids: &[String]) -> Vec<Vec<String>> {
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    for id in ids {
        in_degree.insert(id, 0);
    }
    for edge in &graph.edges {
        if !graph.nodes.contains_key(&edge.from) || !graph.nodes.contains_key(&edge.to) {
            continue;
        }
        successors
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
        *in_degree.entry(edge.to.as_str()).or_insert(0) += 1;
    }

    let mut seed: Vec<&str> = ids
        .iter()
        .filter(|id| graph.nodes[id.as_str()].kind == NodeKind::Start)
        .map(|id| id.as_str())
        .collect();
    if seed.is_empty() {
        seed = ids
            .iter()
            .filter(|id| in_degree.get(id.as_str()).copied().unwrap_or(0) == 0)
            .map(|id| id.as_str())
            .collect();
    }
    if seed.is_empty() {
        seed.push(ids[0].as_str());
    }

    let mut visited: HashSet<&str> = seed.iter().copied().collect();
    let mut levels: Vec<Vec<String>> = Vec::new();
    let mut frontier = seed;
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for id in &frontier {
            if let Some(children) = successors.get(id) {
                for child in children {
                    if visited.insert(child) {
                        next.push(*child);
                    }
                }
            }
        }
        levels.push(frontier.into_iter().map(|id| id.to_string()).collect());
        frontier = next;
    }

    let unreached: Vec<String> = ids
        .iter()
        .filter(|id| !visited.contains(id.as_str()))
        .cloned()
        .collect();
    if !unreached.is_empty() {
        levels.push(unreached);
    }

    levels
}

/// Four-pass barycenter heuristic: alternate downward sweeps (parents
/// as reference) and upward sweeps (children as reference). A node with
/// no neighbor in the reference level keeps its current index as sort
/// key; the sort is stable, so ties preserve order.
fn order_levels(graph: &Graph, levels: &mut [Vec<String>], passes: usize) {
    if levels.len() <= 1 {
        return;
    }

    let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &graph.edges {
        if !graph.nodes.contains_key(&edge.from) || !graph.nodes.contains_key(&edge.to) {
            continue;
        }
        children
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
        parents
            .entry(edge.to.as_str())
            .or_default()
            .push(edge.from.as_str());
    }

    let mut index_of: HashMap<String, usize> = HashMap::new();
    for level in levels.iter() {
        for (idx, id) in level.iter().enumerate() {
            index_of.insert(id.clone(), idx);
        }
    }

    for pass in 0..passes {
        let downward = pass % 2 == 0;
        let sweep: Vec<usize> = if downward {
            (1..levels.len()).collect()
        } else {
            (0..levels.len() - 1).rev().collect()
        };
        for level_idx in sweep {
            let reference_idx = if downward { level_idx - 1 } else { level_idx + 1 };
            let reference: HashSet<&str> =
                levels[reference_idx].iter().map(|id| id.as_str()).collect();
            let neighbors = if downward { &parents } else { &children };

            let mut keyed: Vec<(f32, String)> = levels[level_idx]
                .iter()
                .enumerate()
                .map(|(idx, id)| {
                    let mut sum = 0.0f32;
                    let mut count = 0.0f32;
                    if let Some(list) = neighbors.get(id.as_str()) {
                        for neighbor in list {
                            if reference.contains(neighbor) {
                                if let Some(pos) = index_of.get(*neighbor) {
                                    sum += *pos as f32;
                                    count += 1.0;
                                }
                            }
                        }
                    }
                    let key = if count > 0.0 { sum / count } else { idx as f32 };
                    (key, id.clone())
                })
                .collect();
            keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            levels[level_idx] = keyed.into_iter().map(|(_, id)| id).collect();
            for (idx, id) in levels[level_idx].iter().enumerate() {
                index_of.insert(id.clone(), idx);
            }
        }
    }
}
