//! Application entry point for the flash field viewer.
//!
//! Loads the configuration and the flash dataset, then either opens an
//! eframe window driven by [`Viewer`] or renders a fixed number of frames
//! off-screen.

mod headless;
mod viewer;

use std::{fs::File, io::BufReader, path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::Parser;
use flash_core::{
    config::FieldConfig,
    dataset::{Dataset, DatasetOptions},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use viewer::Viewer;

/// Frames between two debug stat lines.
pub(crate) const STATS_EVERY: u64 = 120;

/// RNG for the initial scatter: fixed when a seed is configured.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

#[derive(Parser, Debug)]
#[command(version, about = "Particles pulled towards lightning flashes")]
struct Args {
    /// Delimited flash table: latitude in column 0, longitude in column 1.
    #[arg(short, long, default_value = "GLM/flashs_filtro.csv")]
    dataset: PathBuf,

    /// YAML file with a partial `FieldConfig`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short = 'n', long)]
    particles: Option<usize>,

    #[arg(long)]
    magnetism: Option<f32>,

    #[arg(long)]
    damping: Option<f32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Use the dataset's own min/max instead of the configured bounds.
    #[arg(long)]
    fit_bounds: bool,

    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// The first line is data, not a header.
    #[arg(long)]
    no_header: bool,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Render this many frames without a window, then exit.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// PNG file for the last headless frame.
    #[arg(long, requires = "headless")]
    snapshot: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<FieldConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            serde_yaml::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => FieldConfig::default(),
    };

    if let Some(n) = args.particles {
        cfg.particle_count = n;
    }
    if let Some(m) = args.magnetism {
        cfg.magnetism = m;
    }
    if let Some(d) = args.damping {
        cfg.damping = d;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();
    let mut cfg = load_config(&args)?;

    let opts = DatasetOptions {
        delimiter: args.delimiter,
        has_header: !args.no_header,
    };
    let dataset = Dataset::load(&args.dataset, &opts)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;

    if args.fit_bounds {
        let Some(bounds) = dataset.bounds() else {
            bail!("--fit-bounds needs at least one row in {}", args.dataset.display());
        };
        info!(?bounds, "bounds fitted to dataset");
        cfg.bounds = bounds;
    }
    cfg.validate().context("invalid configuration")?;

    let dataset = Arc::new(dataset);
    if let Some(frames) = args.headless {
        return headless::run(
            &cfg,
            dataset,
            (args.width, args.height),
            frames,
            args.snapshot.as_deref(),
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_title("Flash Field"),
        ..Default::default()
    };

    info!(width = args.width, height = args.height, "opening window");
    eframe::run_native(
        "Flash Field",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new(cfg, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
