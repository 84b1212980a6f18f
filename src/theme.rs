use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub line_color: String,
    pub text_color: String,
    pub edge_label_background: String,
    pub start_fill: String,
    pub end_fill: String,
    pub action_fill: String,
    pub decision_fill: String,
    pub connector_fill: String,
    pub event_fill: String,
    pub error_fill: String,
    pub context_fill: String,
    pub node_border: String,
    pub yes_edge_color: String,
    pub no_edge_color: String,
    pub error_edge_color: String,
}

impl Theme {
    pub fn console_default() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            line_color: "#7A8AA6".to_string(),
            text_color: "#1C2430".to_string(),
            edge_label_background: "#FFFFFF".to_string(),
            start_fill: "#DCFCE7".to_string(),
            end_fill: "#E2E8F0".to_string(),
            action_fill: "#DBEAFE".to_string(),
            decision_fill: "#FEF3C7".to_string(),
            connector_fill: "#EDE9FE".to_string(),
            event_fill: "#CFFAFE".to_string(),
            error_fill: "#FEE2E2".to_string(),
            context_fill: "#E0E7FF".to_string(),
            node_border: "#C7D2E5".to_string(),
            yes_edge_color: "#22C55E".to_string(),
            no_edge_color: "#94A3B8".to_string(),
            error_edge_color: "#EF4444".to_string(),
        }
    }

    pub fn midnight() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#0B1120".to_string(),
            line_color: "#475569".to_string(),
            text_color: "#E2E8F0".to_string(),
            edge_label_background: "#1E293B".to_string(),
            start_fill: "#14532D".to_string(),
            end_fill: "#334155".to_string(),
            action_fill: "#1E3A8A".to_string(),
            decision_fill: "#713F12".to_string(),
            connector_fill: "#4C1D95".to_string(),
            event_fill: "#164E63".to_string(),
            error_fill: "#7F1D1D".to_string(),
            context_fill: "#312E81".to_string(),
            node_border: "#475569".to_string(),
            yes_edge_color: "#4ADE80".to_string(),
            no_edge_color: "#64748B".to_string(),
            error_edge_color: "#F87171".to_string(),
        }
    }
}
