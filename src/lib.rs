#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig};
pub use ir::{Graph, GraphKind};
pub use layout::{compute_layout, Layout};
pub use parser::parse_graph;
pub use render::render_svg;
pub use theme::Theme;
