//! polyshade CLI - edge occlusion reports for `.geom` polyhedra
//!
//! Reads a polyhedron description, casts the shadows of its facets along
//! the configured light direction and reports which edges stay hidden.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use polyshade_kernel::{read_model, AnalysisConfig, Model, ShadowReport, VisibleSegment};

mod svg;

use svg::SvgRenderer;

#[derive(Parser)]
#[command(name = "polyshade")]
#[command(about = "Hidden-edge analysis for polyhedra under a fixed light", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sum of projection lengths of qualifying hidden edges
    Report {
        /// Input .geom file
        file: PathBuf,
        /// TOML file with light direction and acceptance thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Display counts and placement of a .geom file
    Info {
        /// Input .geom file
        file: PathBuf,
        /// TOML file with light direction and acceptance thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write visible segments and the total as JSON
    Segments {
        /// Input .geom file
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// TOML file with light direction and acceptance thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Draw visible segments seen from above as SVG
    Svg {
        /// Input .geom file
        file: PathBuf,
        /// Output .svg file
        output: PathBuf,
        /// Canvas width and height in pixels
        #[arg(long, default_value_t = 800.0)]
        size: f64,
        /// TOML file with light direction and acceptance thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// JSON document written by `segments`.
#[derive(serde::Serialize)]
struct SegmentsOutput<'a> {
    total: f64,
    hidden_edges: usize,
    qualifying_edges: usize,
    segments: &'a [VisibleSegment],
}

impl<'a> From<&'a ShadowReport> for SegmentsOutput<'a> {
    fn from(report: &'a ShadowReport) -> Self {
        Self {
            total: report.total,
            hidden_edges: report.hidden_edges,
            qualifying_edges: report.qualifying_edges,
            segments: &report.segments,
        }
    }
}

fn main() -> Result<()> {
    // logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { file, config } => {
            let model = load_model(&file, config.as_deref())?;
            println!("{}", model.analyze().summary_line());
        }
        Commands::Info { file, config } => {
            let model = load_model(&file, config.as_deref())?;
            show_info(&file, &model);
        }
        Commands::Segments {
            file,
            output,
            config,
        } => {
            let model = load_model(&file, config.as_deref())?;
            write_segments(&model, output.as_deref())?;
        }
        Commands::Svg {
            file,
            output,
            size,
            config,
        } => {
            let model = load_model(&file, config.as_deref())?;
            write_svg(&model, &output, size)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_model(file: &Path, config_path: Option<&Path>) -> Result<Model> {
    let config = load_config(config_path)?;
    let source = config_path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
    info!(file = %file.display(), config = %source, light = ?config.light, "loading model");
    read_model(file, &config).with_context(|| format!("failed to read {}", file.display()))
}

fn show_info(file: &Path, model: &Model) {
    let p = model.placement();
    let light = model.light();
    let acceptance = model.acceptance();

    println!("polyhedron: {}", file.display());
    println!("  Vertices: {}", model.vertices().len());
    println!("  Facets: {}", model.facets().len());
    println!(
        "  Edges: {} (header declares {})",
        model.edges().len(),
        model.declared_edges()
    );
    println!("\nPlacement:");
    println!("  Scale: {}", p.scale);
    println!(
        "  Angles (deg): alpha {} beta {} gamma {}",
        p.alpha.to_degrees(),
        p.beta.to_degrees(),
        p.gamma.to_degrees()
    );
    println!("\nAnalysis:");
    println!("  Light: [{}, {}, {}]", light.x, light.y, light.z);
    println!(
        "  Center slab: ({}, {})",
        acceptance.center_min, acceptance.center_max
    );
    println!("  Angle limit (rad): {}", acceptance.angle_limit_rad);
}

fn write_segments(model: &Model, output: Option<&Path>) -> Result<()> {
    let report = model.analyze();
    let json = serde_json::to_string_pretty(&SegmentsOutput::from(&report))?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Wrote {} segment(s) to {}",
                report.segments.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn write_svg(model: &Model, output: &Path, size: f64) -> Result<()> {
    if !(size.is_finite() && size > 0.0) {
        anyhow::bail!("canvas size must be positive, got {}", size);
    }
    let mut canvas = SvgRenderer::new(size);
    let report = model.draw(&mut canvas);
    std::fs::write(output, canvas.finish())
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Drew {} segment(s) to {}",
        canvas.segment_count(),
        output.display()
    );
    println!("{}", report.summary_line());
    Ok(())
}
