use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowLayoutConfig {
    /// Vertical distance between consecutive levels.
    pub level_gap: f32,
    /// Canvas width the dynamic spacing targets.
    pub target_width: f32,
    /// Fixed per-node width subtracted before dividing the remaining space.
    pub node_width: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Barycenter sweeps: each pass is one downward plus one upward sweep
    /// counted separately, so 4 passes = down, up, down, up.
    pub order_passes: usize,
}

impl Default for FlowLayoutConfig {
    fn default() -> Self {
        Self {
            level_gap: 120.0,
            target_width: 960.0,
            node_width: 160.0,
            min_gap: 40.0,
            max_gap: 220.0,
            order_passes: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceLayoutConfig {
    pub iterations: usize,
    /// Geometric decay applied to the temperature each iteration.
    pub cooling: f32,
    /// Initial temperature as a fraction of the smaller canvas dimension.
    pub initial_temperature_ratio: f32,
    pub repulsion: f32,
    pub spring: f32,
    pub gravity: f32,
    /// Ideal edge length before the weight adjustment.
    pub edge_length: f32,
    /// Radius model for context nodes: base + scale * sqrt(size metric).
    pub base_radius: f32,
    pub radius_scale: f32,
    pub max_radius: f32,
    /// Viewport clamp padding beyond the node radius.
    pub padding: f32,
}

impl Default for ForceLayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 150,
            cooling: 0.97,
            initial_temperature_ratio: 0.125,
            repulsion: 1800.0,
            spring: 0.04,
            gravity: 0.03,
            edge_length: 150.0,
            base_radius: 18.0,
            radius_scale: 4.0,
            max_radius: 48.0,
            padding: 12.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub flow: FlowLayoutConfig,
    pub force: ForceLayoutConfig,
    pub label_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            flow: FlowLayoutConfig::default(),
            force: ForceLayoutConfig::default(),
            label_line_height: 1.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::console_default();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FlowConfigFile {
    level_gap: Option<f32>,
    target_width: Option<f32>,
    node_width: Option<f32>,
    min_gap: Option<f32>,
    max_gap: Option<f32>,
    order_passes: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ForceConfigFile {
    iterations: Option<usize>,
    cooling: Option<f32>,
    initial_temperature_ratio: Option<f32>,
    repulsion: Option<f32>,
    spring: Option<f32>,
    gravity: Option<f32>,
    edge_length: Option<f32>,
    base_radius: Option<f32>,
    radius_scale: Option<f32>,
    max_radius: Option<f32>,
    padding: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    line_color: Option<String>,
    text_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    flow: Option<FlowConfigFile>,
    force: Option<ForceConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "midnight" {
            config.theme = Theme::midnight();
        } else if theme_name == "default" || theme_name == "console" {
            config.theme = Theme::console_default();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
    }

    if let Some(flow) = parsed.flow {
        if let Some(v) = flow.level_gap {
            config.layout.flow.level_gap = v;
        }
        if let Some(v) = flow.target_width {
            config.layout.flow.target_width = v;
        }
        if let Some(v) = flow.node_width {
            config.layout.flow.node_width = v;
        }
        if let Some(v) = flow.min_gap {
            config.layout.flow.min_gap = v;
        }
        if let Some(v) = flow.max_gap {
            config.layout.flow.max_gap = v;
        }
        if let Some(v) = flow.order_passes {
            config.layout.flow.order_passes = v;
        }
    }

    if let Some(force) = parsed.force {
        if let Some(v) = force.iterations {
            config.layout.force.iterations = v;
        }
        if let Some(v) = force.cooling {
            config.layout.force.cooling = v;
        }
        if let Some(v) = force.initial_temperature_ratio {
            config.layout.force.initial_temperature_ratio = v;
        }
        if let Some(v) = force.repulsion {
            config.layout.force.repulsion = v;
        }
        if let Some(v) = force.spring {
            config.layout.force.spring = v;
        }
        if let Some(v) = force.gravity {
            config.layout.force.gravity = v;
        }
        if let Some(v) = force.edge_length {
            config.layout.force.edge_length = v;
        }
        if let Some(v) = force.base_radius {
            config.layout.force.base_radius = v;
        }
        if let Some(v) = force.radius_scale {
            config.layout.force.radius_scale = v;
        }
        if let Some(v) = force.max_radius {
            config.layout.force.max_radius = v;
        }
        if let Some(v) = force.padding {
            config.layout.force.padding = v;
        }
    }

    Ok(config)
}
