use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use image::ImageReader;
use serde::{Deserialize, Serialize};
use tracing::info;
use uv_optimizer_core::{
    InputFace, InputModel, InputTexture, OptimizeOutput, OptimizedFace, OptimizerConfig, UvRect,
    optimize_uv,
};

#[derive(Parser, Debug)]
#[command(
    name = "uv-optimizer",
    about = "Merge similar faces, downsize face textures and repack model UVs into a compact atlas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Optimize a model's UVs and write the atlas PNG + updated faces JSON
    Optimize(OptimizeArgs),
    /// Run the optimization and print statistics without writing files
    Stats(OptimizeArgs),
}

#[derive(Parser, Debug, Clone)]
struct OptimizeArgs {
    // Input/Output
    /// Model manifest (JSON: uv space, texture paths, faces)
    #[arg(help_heading = "Input/Output")]
    manifest: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,

    // Optimization
    /// Gap between packed groups (pixels)
    #[arg(long, default_value_t = 0, help_heading = "Optimization")]
    gap: u32,
    /// Face-merge similarity threshold (%), 50..=100
    #[arg(long, default_value_t = 90, help_heading = "Optimization")]
    similarity: u8,
    /// Ignore faces below this valid-pixel share (%), 0..=100
    #[arg(long, default_value_t = 1, help_heading = "Optimization")]
    ignore_below: u8,
    /// Texture downsize similarity threshold (%), 50..=100
    #[arg(long, default_value_t = 90, help_heading = "Optimization")]
    downsize_threshold: u8,
    /// Padding inside each slot (pixels), 0..=5
    #[arg(long, default_value_t = 0, help_heading = "Optimization")]
    padding: u32,
    /// Also check flipped/rotated variants when merging
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Optimization")]
    check_flip: bool,
    /// Keep the output surface square
    #[arg(long, default_value_t = false, help_heading = "Optimization")]
    square: bool,
    /// Rearrange only: no merging, no downsizing
    #[arg(long, default_value_t = false, help_heading = "Optimization")]
    rearrange_only: bool,
}

/// On-disk model description. Texture paths are resolved relative to the
/// manifest's directory.
#[derive(Debug, Deserialize)]
struct Manifest {
    uv_width: f32,
    uv_height: f32,
    textures: Vec<PathBuf>,
    faces: Vec<ManifestFace>,
}

#[derive(Debug, Deserialize)]
struct ManifestFace {
    key: String,
    /// x1, y1, x2, y2 in texture-space units
    uv: [f32; 4],
    #[serde(default)]
    texture: Option<usize>,
}

#[derive(Debug, Serialize)]
struct OutputDoc<'a> {
    uv_width: u32,
    uv_height: u32,
    faces: &'a [OptimizedFace],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Optimize(args) => run_optimize(args),
        Commands::Stats(args) => run_stats(args),
    }
}

fn run_optimize(args: &OptimizeArgs) -> anyhow::Result<()> {
    let out = load_and_optimize(args)?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;
    let png_path = args.out_dir.join(format!("{}.png", args.name));
    out.atlas
        .save(&png_path)
        .with_context(|| format!("write atlas {}", png_path.display()))?;

    let doc = OutputDoc {
        uv_width: out.uv_width,
        uv_height: out.uv_height,
        faces: &out.faces,
    };
    let json_path = args.out_dir.join(format!("{}.json", args.name));
    fs::write(&json_path, serde_json::to_string_pretty(&doc)?)
        .with_context(|| format!("write faces {}", json_path.display()))?;

    info!(
        atlas = %png_path.display(),
        faces = %json_path.display(),
        "wrote outputs"
    );
    println!("{}", out.stats.summary());
    Ok(())
}

fn run_stats(args: &OptimizeArgs) -> anyhow::Result<()> {
    let out = load_and_optimize(args)?;
    println!("{}", out.stats.summary());
    Ok(())
}

fn load_and_optimize(args: &OptimizeArgs) -> anyhow::Result<OptimizeOutput> {
    let manifest_text = fs::read_to_string(&args.manifest)
        .with_context(|| format!("read manifest {}", args.manifest.display()))?;
    let manifest: Manifest = serde_json::from_str(&manifest_text)
        .with_context(|| format!("parse manifest {}", args.manifest.display()))?;
    let base_dir = args.manifest.parent().unwrap_or(Path::new("."));

    let mut textures = Vec::with_capacity(manifest.textures.len());
    for rel in &manifest.textures {
        let path = base_dir.join(rel);
        let image = ImageReader::open(&path)
            .with_context(|| format!("open texture {}", path.display()))?
            .decode()
            .with_context(|| format!("decode texture {}", path.display()))?;
        textures.push(InputTexture {
            key: rel.display().to_string(),
            image,
        });
    }
    info!(
        faces = manifest.faces.len(),
        textures = textures.len(),
        "loaded model"
    );

    let faces = manifest
        .faces
        .into_iter()
        .map(|f| InputFace {
            key: f.key,
            uv: UvRect::new(f.uv[0], f.uv[1], f.uv[2], f.uv[3]),
            texture: f.texture,
        })
        .collect();
    let model = InputModel {
        faces,
        textures,
        uv_width: manifest.uv_width,
        uv_height: manifest.uv_height,
    };

    let cfg = OptimizerConfig::builder()
        .gap(args.gap)
        .similarity_threshold(args.similarity)
        .ignore_valid_pixel_percent(args.ignore_below)
        .downsize_threshold(args.downsize_threshold)
        .padding(args.padding)
        .check_flip(args.check_flip)
        .square(args.square)
        .rearrange_only(args.rearrange_only)
        .build();

    optimize_uv(model, cfg).context("uv optimization failed")
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
