use anyhow::{Context, Result};
use clap::Parser;
use groove_vision::{PipelineConfig, TexturePipeline, ViewMode, image_helper};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Measure nut shell surface texture and render a diagnostic view.
#[derive(Parser, Debug)]
#[command(name = "texture_tester")]
#[command(about = "Run the groove_vision texture pipeline on a single image")]
struct Args {
    /// Input image (any format the `image` crate can decode)
    input: PathBuf,

    /// Output PNG path for the rendered view
    output: PathBuf,

    /// View to render: original, overlay, sketch or mask
    #[arg(short, long, default_value = "overlay")]
    mode: ViewMode,

    /// JSON pipeline configuration; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the phenotypic metrics as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Override the number of smoothing passes
    #[arg(long)]
    smoothing_passes: Option<usize>,

    /// Worker threads for per-pixel stages (defaults to the CPU count)
    #[arg(long, default_value_t = num_cpus::get())]
    threads: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build_global()
        .context("failed to configure worker threads")?;

    // --- 1. Configuration ---
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            PipelineConfig::from_json_str(&json)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(passes) = args.smoothing_passes {
        config.smoothing_passes = passes;
    }
    let pipeline = TexturePipeline::new(config)?;

    // --- 2. Image Loading ---
    let pixels = image_helper::load(&args.input)
        .with_context(|| format!("could not load {}", args.input.display()))?;
    info!(width = pixels.width(), height = pixels.height(), "loaded image");

    // --- 3. Analysis & Rendering ---
    let analysis = pipeline.analyze(&pixels, args.mode)?;
    image_helper::save(&args.output, &analysis.output)?;
    info!(output = %args.output.display(), mode = %args.mode, "rendered view saved");

    // --- 4. Reporting ---
    match &analysis.data {
        Some(data) => {
            println!("groove density     : {:.4}", data.groove_density);
            println!("fractal dimension  : {:.4}", data.fractal_dimension);
            println!("fragmentation count: {}", data.fragmentation_count);
            println!("processing time    : {:.2} ms", data.processing_time_ms);
            if let Some(path) = &args.json {
                let json = serde_json::to_string_pretty(data)?;
                std::fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
        None => println!("original view: no metrics computed"),
    }

    Ok(())
}
