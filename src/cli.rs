use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::{write_layout_dump, LayoutDump};
use crate::parser::parse_graph;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "fgr", version, about = "Flow and dependency graph renderer")]
pub struct Args {
    /// Input graph file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for svg/json if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Canvas height
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
    /// Positions and levels as JSON, no drawing
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;

    let input = read_input(args.input.as_deref())?;
    let graph = parse_graph(&input)?;
    let layout = compute_layout(&graph, &config.layout, args.width, args.height);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout)?,
            None => println!("{}", LayoutDump::from_layout(&layout).to_json()?),
        },
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
