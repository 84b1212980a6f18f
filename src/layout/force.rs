use crate::config::{ForceLayoutConfig, LayoutConfig};
use crate::ir::{Graph, Node};
use std::collections::{BTreeMap, HashMap};

use super::{EdgeLayout, Layout, NodeLayout};

/// Golden angle, pi * (3 - sqrt(5)). Spacing successive spiral seeds by
/// this angle spreads them evenly and keeps the initial repulsion pass
/// away from the all-at-origin singularity.
const GOLDEN_ANGLE: f32 = 2.399_963_2;

const MIN_DISTANCE: f32 = 0.01;

/// Spring-repulsion layout for dependency graphs. Runs the full
/// iteration budget unconditionally; the cost is O(iterations * n^2)
/// from the pairwise repulsion term.
pub(super) fn compute_force_layout(
    graph: &Graph,
    config: &LayoutConfig,
    width: f32,
    height: f32,
) -> Layout {
    let force = &config.force;
    let ids = graph.ordered_node_ids();
    let n = ids.len();
    let center = (width / 2.0, height / 2.0);

    let mut positions: Vec<(f32, f32)> = Vec::with_capacity(n);
    let radii: Vec<f32> = ids
        .iter()
        .map(|id| node_radius(&graph.nodes[id], force))
        .collect();

    if n == 1 {
        positions.push(center);
    } else if n > 1 {
        let max_radius = radii.iter().copied().fold(0.0f32, f32::max);
        let spiral_span = (width.min(height) / 2.0 - max_radius - force.padding).max(1.0);
        for idx in 0..n {
            let angle = idx as f32 * GOLDEN_ANGLE;
            let r = spiral_span * (idx as f32 / n as f32).sqrt();
            positions.push((center.0 + r * angle.cos(), center.1 + r * angle.sin()));
        }
        simulate(graph, &ids, &radii, &mut positions, force, center, width, height);
    }

    for (idx, pos) in positions.iter_mut().enumerate() {
        pos.0 = clamp_axis(pos.0, radii[idx] + force.padding, width - radii[idx] - force.padding);
        pos.1 = clamp_axis(pos.1, radii[idx] + force.padding, height - radii[idx] - force.padding);
    }

    let mut nodes: BTreeMap<String, NodeLayout> = BTreeMap::new();
    for (idx, id) in ids.iter().enumerate() {
        let node = &graph.nodes[id];
        nodes.insert(
            id.clone(),
            NodeLayout {
                id: id.clone(),
                x: positions[idx].0,
                y: positions[idx].1,
                radius: radii[idx],
                level: None,
                kind: node.kind,
                label: node.label.clone(),
                connector: node.connector.clone(),
            },
        );
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

    Layout {
        kind: graph.kind,
        nodes,
        edges,
        levels: Vec::new(),
        width,
        height,
    }
}

fn node_radius(node: &Node, force: &ForceLayoutConfig) -> f32 {
    (force.base_radius + force.radius_scale * (node.size_metric() as f32).sqrt())
        .min(force.max_radius)
}

#[allow(clippy::too_many_arguments)]
fn simulate(
    graph: &Graph,
    ids: &[String],
    radii: &[f32],
    positions: &mut [(f32, f32)],
    force: &ForceLayoutConfig,
    center: (f32, f32),
    width: f32,
    height: f32,
) {
    let n = positions.len();
    let index_of: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.as_str(), idx))
        .collect();
    let mut temperature = width.min(height) * force.initial_temperature_ratio;
    let mut displacement = vec![(0.0f32, 0.0f32); n];

    for _ in 0..force.iterations {
        for d in displacement.iter_mut() {
            *d = (0.0, 0.0);
        }

        // Coulomb-style repulsion, scaled by combined radii.
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = positions[j].0 - positions[i].0;
                let dy = positions[j].1 - positions[i].1;
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let push = force.repulsion * (radii[i] + radii[j]) / (dist * dist);
                let ux = dx / dist;
                let uy = dy / dist;
                displacement[i].0 -= ux * push;
                displacement[i].1 -= uy * push;
                displacement[j].0 += ux * push;
                displacement[j].1 += uy * push;
            }
        }

        // Hooke attraction toward a weight-dependent ideal length.
        // Edges with unknown endpoints contribute no force.
        for edge in &graph.edges {
            let (Some(&i), Some(&j)) = (
                index_of.get(edge.from.as_str()),
                index_of.get(edge.to.as_str()),
            ) else {
                continue;
            };
            if i == j {
                continue;
            }
            let dx = positions[j].0 - positions[i].0;
            let dy = positions[j].1 - positions[i].1;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let ideal = force.edge_length / edge.weight.clamp(0.1, 10.0);
            let pull = force.spring * (dist - ideal);
            let ux = dx / dist;
            let uy = dy / dist;
            displacement[i].0 += ux * pull;
            displacement[i].1 += uy * pull;
            displacement[j].0 -= ux * pull;
            displacement[j].1 -= uy * pull;
        }

        // Weak centering gravity.
        for (idx, pos) in positions.iter().enumerate() {
            displacement[idx].0 += (center.0 - pos.0) * force.gravity;
            displacement[idx].1 += (center.1 - pos.1) * force.gravity;
        }

        // Apply with the temperature cap, then cool.
        for (idx, pos) in positions.iter_mut().enumerate() {
            let (dx, dy) = displacement[idx];
            let len = (dx * dx + dy * dy).sqrt();
            if len > 0.0 {
                let capped = len.min(temperature);
                pos.0 += dx / len * capped;
                pos.1 += dy / len * capped;
            }
        }
        temperature *= force.cooling;
    }
}

/// Clamp with a collapsed-interval guard: a canvas smaller than the
/// node's diameter plus padding pins the node to the axis midpoint.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        value.clamp(lo, hi)
    }
}
