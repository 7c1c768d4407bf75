//! hazvis - hazard visibility analysis CLI
//!
//! Fuses a photograph with scene geometry rendered from the same viewpoint
//! and reports which physical boundaries lack the contrast to be seen.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "hazvis")]
#[command(author, version, about = "Hazard visibility analysis from images and scene geometry")]
#[command(long_about = "
Fuses a photograph with per-pixel scene geometry rendered from the same
viewpoint, finds the physical boundaries (steps, obstacles, creases), and
measures how far each one sits from the nearest luminance edge. Boundaries
with no contrast cue nearby are hazards for low-vision viewers.

Examples:
  hazvis analyze room.png room.coords pos.txt dst.txt nrm.txt out.png
  hazvis analyze room.png room.coords pos.txt dst.txt nrm.txt out.png \\
      --score --palette red-green --mask door.png
  hazvis analyze room.png room.coords pos.txt dst.txt nrm.txt out.png \\
      --false-positives fp.png --luminance-edges edges.png
  hazvis edges room.png edges.png --sigma 2.0
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full visibility analysis
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Detect luminance edges only
    #[command(visible_alias = "e")]
    Edges(EdgesArgs),
}

/// Measurement shape mapping invisibility distance to hazard level.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum MeasurementKind {
    /// 1 - scale / (distance + scale)
    Reciprocal,
    /// min(distance, max-hazard) / max-hazard
    Linear,
    /// 1 - exp(-0.5 (distance / sigma)^2)
    Gaussian,
}

/// Color ramp for the hazard rendering.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaletteKind {
    /// Gray at visible, red at hazardous
    RedGray,
    /// Green at visible, red at hazardous
    RedGreen,
    /// Cyan at visible, red at hazardous
    GrayCyan,
}

/// Arguments for the `analyze` command.
#[derive(Args)]
struct AnalyzeArgs {
    /// Input photograph (PNG)
    image: PathBuf,

    /// Coordinates file (length unit and field of view)
    coordinates: PathBuf,

    /// Per-pixel surface positions (ASCII raster, three values per pixel)
    positions: PathBuf,

    /// Per-pixel viewpoint distances (ASCII raster)
    distances: PathBuf,

    /// Per-pixel surface normals (ASCII raster, three values per pixel)
    normals: PathBuf,

    /// Output hazard rendering (PNG)
    output: PathBuf,

    /// Treat the input image as linear rather than gamma-encoded
    #[arg(long)]
    linear_input: bool,

    /// Measurement mapping distance to hazard level
    #[arg(short, long, value_enum, default_value = "reciprocal")]
    measurement: MeasurementKind,

    /// Half-level distance for the reciprocal measurement, in degrees
    #[arg(long, default_value = "0.5")]
    scale: f32,

    /// Saturation distance for the linear measurement, in degrees
    #[arg(long, default_value = "2.0")]
    max_hazard: f32,

    /// Width of the gaussian measurement, in degrees
    #[arg(long, default_value = "0.75")]
    sigma_deg: f32,

    /// Color palette for the rendering
    #[arg(short, long, value_enum, default_value = "red-gray")]
    palette: PaletteKind,

    /// Gaussian sigma for luminance edge detection, in pixels
    #[arg(long, default_value = "1.4")]
    edge_sigma: f32,

    /// Position patch diameter in pixels (odd, at least 3)
    #[arg(long, default_value = "3")]
    position_patch: u32,

    /// Orientation patch diameter in pixels (odd, at least 3)
    #[arg(long, default_value = "3")]
    orientation_patch: u32,

    /// Position break threshold in centimeters
    #[arg(long, default_value = "2.0")]
    position_threshold: f32,

    /// Orientation break threshold in degrees
    #[arg(long, default_value = "20.0")]
    orientation_threshold: f32,

    /// Mask image (PNG); white pixels are suppressed
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Region of interest image (PNG); analysis restricted to white pixels
    #[arg(long)]
    roi: Option<PathBuf>,

    /// Write the false-positive rendering (contrast with no physical cause)
    /// to this path
    #[arg(long, value_name = "PATH")]
    false_positives: Option<PathBuf>,

    /// Write the luminance edge map to this path
    #[arg(long, value_name = "PATH")]
    luminance_edges: Option<PathBuf>,

    /// Write the geometric boundary map to this path
    #[arg(long, value_name = "PATH")]
    geometry_edges: Option<PathBuf>,

    /// Print the scalar visibility score
    #[arg(short, long)]
    score: bool,
}

/// Arguments for the `edges` command.
#[derive(Args)]
struct EdgesArgs {
    /// Input photograph (PNG)
    image: PathBuf,

    /// Output edge map (PNG)
    output: PathBuf,

    /// Treat the input image as linear rather than gamma-encoded
    #[arg(long)]
    linear_input: bool,

    /// Gaussian smoothing sigma in pixels
    #[arg(short, long, default_value = "1.4")]
    sigma: f32,

    /// Write the normalized gradient magnitude to this path
    #[arg(long, value_name = "PATH")]
    magnitude: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, cli.verbose),
        Commands::Edges(args) => commands::edges::run(args, cli.verbose),
    }
}
