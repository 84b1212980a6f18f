use std::path::{Path, PathBuf};

use flowgraph_renderer::{
    compute_layout, parse_graph, render_svg, Graph, GraphKind, Layout, LayoutConfig, Theme,
};

const CANVAS_W: f32 = 1200.0;
const CANVAS_H: f32 = 800.0;

fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn load_fixture(rel: &str) -> Graph {
    let input = std::fs::read_to_string(fixture_path(rel)).expect("fixture read failed");
    parse_graph(&input).expect("parse failed")
}

fn layout_fixture(rel: &str) -> Layout {
    let graph = load_fixture(rel);
    compute_layout(&graph, &LayoutConfig::default(), CANVAS_W, CANVAS_H)
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

/// Every node in the graph gets exactly one position.
fn assert_complete(graph: &Graph, layout: &Layout, fixture: &str) {
    assert_eq!(
        layout.positions().len(),
        graph.nodes.len(),
        "{fixture}: node count mismatch"
    );
    for id in graph.nodes.keys() {
        assert!(
            layout.nodes.contains_key(id),
            "{fixture}: missing position for {id}"
        );
    }
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "flow/chain.json5",
        "flow/diamond.json5",
        "flow/cycle.json5",
        "flow/disconnected.json5",
        "flow/branching.json5",
        "dependency/small.json5",
        "dependency/weighted.json5",
        "dependency/single.json5",
    ];

    for rel in candidates {
        let path = fixture_path(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let graph = load_fixture(rel);
        let layout = compute_layout(&graph, &LayoutConfig::default(), CANVAS_W, CANVAS_H);
        assert_complete(&graph, &layout, rel);
        let svg = render_svg(&layout, &Theme::console_default(), &LayoutConfig::default());
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn chain_stacks_vertically_on_the_axis() {
    let layout = layout_fixture("flow/chain.json5");
    assert_eq!(layout.levels.len(), 3);

    let trigger = &layout.nodes["trigger"];
    let plan = &layout.nodes["plan"];
    let done = &layout.nodes["done"];
    for node in [trigger, plan, done] {
        assert!(node.x.abs() < 1e-3, "single-node level should sit at x=0");
    }
    assert!(trigger.y < plan.y);
    assert!(plan.y < done.y);
}

#[test]
fn diamond_levels_and_reconvergence() {
    let layout = layout_fixture("flow/diamond.json5");
    assert_eq!(layout.nodes["a"].level, Some(0));
    assert_eq!(layout.nodes["b"].level, Some(1));
    assert_eq!(layout.nodes["c"].level, Some(1));
    assert_eq!(layout.nodes["d"].level, Some(2));
    // Siblings spread symmetrically around the vertical axis.
    assert!((layout.nodes["b"].x + layout.nodes["c"].x).abs() < 1e-3);
    assert!(layout.nodes["b"].x != layout.nodes["c"].x);
}

#[test]
fn flow_levels_are_centered_at_zero() {
    for rel in [
        "flow/chain.json5",
        "flow/diamond.json5",
        "flow/disconnected.json5",
        "flow/branching.json5",
    ] {
        let layout = layout_fixture(rel);
        for (idx, level) in layout.levels.iter().enumerate() {
            let mean: f32 =
                level.iter().map(|id| layout.nodes[id].x).sum::<f32>() / level.len() as f32;
            assert!(
                mean.abs() < 1e-2,
                "{rel}: level {idx} mean x = {mean}, expected 0"
            );
        }
    }
}

#[test]
fn forward_edges_descend_one_level() {
    for rel in ["flow/chain.json5", "flow/diamond.json5", "flow/branching.json5"] {
        let graph = load_fixture(rel);
        let layout = compute_layout(&graph, &LayoutConfig::default(), CANVAS_W, CANVAS_H);
        for edge in &graph.edges {
            let (Some(from), Some(to)) = (layout.nodes.get(&edge.from), layout.nodes.get(&edge.to))
            else {
                continue;
            };
            let (Some(from_level), Some(to_level)) = (from.level, to.level) else {
                continue;
            };
            assert!(
                to_level > from_level,
                "{rel}: edge {} -> {} goes from level {from_level} to {to_level}",
                edge.from,
                edge.to
            );
        }
    }
}

#[test]
fn cycle_places_every_node() {
    let graph = load_fixture("flow/cycle.json5");
    let layout = compute_layout(&graph, &LayoutConfig::default(), CANVAS_W, CANVAS_H);
    assert_complete(&graph, &layout, "flow/cycle.json5");
    assert_eq!(layout.levels.iter().map(Vec::len).sum::<usize>(), 3);
}

#[test]
fn disconnected_nodes_land_in_final_level() {
    let layout = layout_fixture("flow/disconnected.json5");
    let last = layout.levels.last().expect("levels");
    assert!(last.contains(&"orphan1".to_string()));
    assert!(last.contains(&"orphan2".to_string()));
}

#[test]
fn layouts_are_deterministic() {
    for rel in ["flow/branching.json5", "dependency/weighted.json5"] {
        let graph = load_fixture(rel);
        let first = compute_layout(&graph, &LayoutConfig::default(), CANVAS_W, CANVAS_H);
        let second = compute_layout(&graph, &LayoutConfig::default(), CANVAS_W, CANVAS_H);
        assert_eq!(
            first.positions(),
            second.positions(),
            "{rel}: layout is not deterministic"
        );
    }
}

#[test]
fn dependency_nodes_stay_inside_the_canvas() {
    for rel in ["dependency/small.json5", "dependency/weighted.json5"] {
        let layout = layout_fixture(rel);
        assert_eq!(layout.kind, GraphKind::Dependency);
        for node in layout.nodes.values() {
            assert!(
                node.x >= node.radius && node.x <= CANVAS_W - node.radius,
                "{rel}: {} x={} r={} outside canvas",
                node.id,
                node.x,
                node.radius
            );
            assert!(
                node.y >= node.radius && node.y <= CANVAS_H - node.radius,
                "{rel}: {} y={} r={} outside canvas",
                node.id,
                node.y,
                node.radius
            );
        }
    }
}

#[test]
fn single_dependency_node_sits_at_center() {
    let layout = layout_fixture("dependency/single.json5");
    let node = layout.nodes.values().next().expect("one node");
    assert!((node.x - CANVAS_W / 2.0).abs() < 1e-3);
    assert!((node.y - CANVAS_H / 2.0).abs() < 1e-3);
}
