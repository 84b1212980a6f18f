use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::ir::{EdgeVariant, GraphKind, NodeKind};
use crate::layout::{EdgeLayout, Layout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const FLOW_NODE_HEIGHT: f32 = 44.0;
const MARGIN: f32 = 40.0;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    match layout.kind {
        GraphKind::Flow => render_flow_svg(layout, theme, config),
        GraphKind::Dependency => render_dependency_svg(layout, theme),
    }
}

/// Flow layouts are centered around x = 0; rendering shifts everything
/// into positive SVG space.
fn render_flow_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let width = layout.width.max(200.0) + MARGIN * 2.0;
    let height = layout.height.max(100.0) + MARGIN * 2.0;
    let offset_x = width / 2.0;
    let offset_y = MARGIN + FLOW_NODE_HEIGHT / 2.0;
    let node_width = config.flow.node_width;

    let mut svg = svg_open(width, height, theme);

    for edge in &layout.edges {
        let Some(((x1, y1), (x2, y2))) = edge_endpoints(edge) else {
            continue;
        };
        let from_y = y1 + offset_y + FLOW_NODE_HEIGHT / 2.0;
        let to_y = y2 + offset_y - FLOW_NODE_HEIGHT / 2.0;
        let stroke = edge_stroke(edge.variant, theme);
        svg.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            x1 + offset_x,
            from_y,
            x2 + offset_x,
            to_y,
            stroke,
        ));
        if let Some(label) = &edge.label {
            let mid_x = (x1 + x2) / 2.0 + offset_x;
            let mid_y = (from_y + to_y) / 2.0;
            svg.push_str(&edge_label_svg(mid_x, mid_y, label, theme));
        }
    }

    for node in layout.nodes.values() {
        let cx = node.x + offset_x;
        let cy = node.y + offset_y;
        svg.push_str(&flow_node_svg(node, cx, cy, node_width, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn render_dependency_svg(layout: &Layout, theme: &Theme) -> String {
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);
    let mut svg = svg_open(width, height, theme);

    for edge in &layout.edges {
        let Some(((x1, y1), (x2, y2))) = edge_endpoints(edge) else {
            continue;
        };
        // Dependency edges render without arrowheads: the relationship
        // is bidirectional even though the input edge is directed.
        let stroke_width = (edge.weight.clamp(0.2, 4.0)).max(0.8);
        svg.push_str(&format!(
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{stroke_width:.2}\" stroke-opacity=\"0.6\"/>",
            theme.line_color,
        ));
        if let Some(label) = &edge.label {
            svg.push_str(&edge_label_svg((x1 + x2) / 2.0, (y1 + y2) / 2.0, label, theme));
        }
    }

    for node in layout.nodes.values() {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            node.x, node.y, node.radius, theme.context_fill, theme.node_border,
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            node.x,
            node.y + node.radius + theme.font_size,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            escape_xml(&node.label),
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn svg_open(width: f32, height: f32, theme: &Theme) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");
    svg
}

fn flow_node_svg(node: &NodeLayout, cx: f32, cy: f32, node_width: f32, theme: &Theme) -> String {
    let x = cx - node_width / 2.0;
    let y = cy - FLOW_NODE_HEIGHT / 2.0;
    let fill = node_fill(node.kind, theme);
    let mut svg = String::new();

    match node.kind {
        NodeKind::Decision => {
            let half_w = node_width / 2.0;
            let half_h = FLOW_NODE_HEIGHT / 2.0 + 8.0;
            svg.push_str(&format!(
                "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
                cx, cy - half_h,
                cx + half_w, cy,
                cx, cy + half_h,
                cx - half_w, cy,
                fill, theme.node_border,
            ));
        }
        NodeKind::Start | NodeKind::End => {
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{node_width:.2}\" height=\"{FLOW_NODE_HEIGHT:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{fill}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
                FLOW_NODE_HEIGHT / 2.0,
                FLOW_NODE_HEIGHT / 2.0,
                theme.node_border,
            ));
        }
        _ => {
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{node_width:.2}\" height=\"{FLOW_NODE_HEIGHT:.2}\" rx=\"8\" ry=\"8\" fill=\"{fill}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
                theme.node_border,
            ));
        }
    }

    svg.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        cy + theme.font_size * 0.35,
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(&node.label),
    ));
    if let Some(connector) = &node.connector {
        svg.push_str(&format!(
            "<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.1}\" fill=\"{}\" fill-opacity=\"0.7\">{}</text>",
            cy + FLOW_NODE_HEIGHT / 2.0 + theme.font_size,
            theme.font_family,
            theme.font_size * 0.85,
            theme.text_color,
            escape_xml(connector),
        ));
    }
    svg
}

fn edge_label_svg(x: f32, y: f32, label: &str, theme: &Theme) -> String {
    let est_width = estimate_text_width(label, theme.font_size);
    let rect_x = x - est_width / 2.0 - 6.0;
    let rect_y = y - theme.font_size / 2.0 - 4.0;
    let rect_w = est_width + 12.0;
    let rect_h = theme.font_size + 8.0;
    let mut svg = format!(
        "<rect x=\"{rect_x:.2}\" y=\"{rect_y:.2}\" width=\"{rect_w:.2}\" height=\"{rect_h:.2}\" rx=\"6\" ry=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"0.8\"/>",
        theme.edge_label_background, theme.node_border,
    );
    svg.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        y + theme.font_size * 0.35,
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(label),
    ));
    svg
}

fn edge_endpoints(edge: &EdgeLayout) -> Option<((f32, f32), (f32, f32))> {
    if edge.points.len() < 2 {
        return None;
    }
    Some((edge.points[0], edge.points[edge.points.len() - 1]))
}

fn edge_stroke(variant: EdgeVariant, theme: &Theme) -> &str {
    match variant {
        EdgeVariant::Yes => &theme.yes_edge_color,
        EdgeVariant::No => &theme.no_edge_color,
        EdgeVariant::Error => &theme.error_edge_color,
        EdgeVariant::Default => &theme.line_color,
    }
}

fn node_fill(kind: NodeKind, theme: &Theme) -> &str {
    match kind {
        NodeKind::Start => &theme.start_fill,
        NodeKind::End => &theme.end_fill,
        NodeKind::Action => &theme.action_fill,
        NodeKind::Decision => &theme.decision_fill,
        NodeKind::Connector => &theme.connector_fill,
        NodeKind::Event => &theme.event_fill,
        NodeKind::Error => &theme.error_fill,
        NodeKind::Context => &theme.context_fill,
    }
}

/// Rough average-advance estimate; labels here only size their backdrop
/// rects, so real glyph metrics are not worth a font database.
fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.58
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Edge, Graph, GraphKind};
    use crate::layout::compute_layout;

    #[test]
    fn render_flow_svg_basic() {
        let mut graph = Graph::new(GraphKind::Flow);
        graph.ensure_node("a", Some("Trigger".to_string()), Some(NodeKind::Start));
        graph.ensure_node("b", Some("Notify".to_string()), Some(NodeKind::Action));
        graph.edges.push(Edge {
            from: "a".to_string(),
            to: "b".to_string(),
            label: Some("go".to_string()),
            variant: EdgeVariant::Default,
            weight: 1.0,
        });
        let layout = compute_layout(&graph, &LayoutConfig::default(), 800.0, 600.0);
        let svg = render_svg(&layout, &Theme::console_default(), &LayoutConfig::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Trigger"));
        assert!(svg.contains("marker-end"));
    }

    #[test]
    fn render_dependency_svg_uses_circles_without_arrows() {
        let mut graph = Graph::new(GraphKind::Dependency);
        graph.ensure_node("ctx", Some("Billing".to_string()), Some(NodeKind::Context));
        let layout = compute_layout(&graph, &LayoutConfig::default(), 400.0, 400.0);
        let svg = render_svg(&layout, &Theme::midnight(), &LayoutConfig::default());
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("marker-end"));
        assert!(svg.contains("Billing"));
    }

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape_xml("a<b&c"), "a&lt;b&amp;c");
    }
}
