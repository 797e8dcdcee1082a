//! Off-screen runs into a [`PixelBuffer`], optionally saved as PNG.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use flash_core::{
    canvas::{Canvas, PixelBuffer},
    config::FieldConfig,
    dataset::Dataset,
    scene::Scene,
};
use tracing::{debug, info};

use crate::{STATS_EVERY, seeded_rng};

pub fn run(
    cfg: &FieldConfig,
    dataset: Arc<Dataset>,
    (width, height): (f32, f32),
    frames: u64,
    snapshot: Option<&Path>,
) -> Result<()> {
    let mut rng = seeded_rng(cfg.seed);
    let mut canvas = PixelBuffer::new(width.round() as u32, height.round() as u32);
    let mut scene = Scene::initialize(cfg, dataset, canvas.size(), &mut rng)
        .context("failed to initialize field")?;

    let mut last = None;
    for _ in 0..frames {
        let stats = scene.advance_and_render(&mut canvas);
        if stats.frame % STATS_EVERY == 0 {
            debug!(?stats, "frame");
        }
        last = Some(stats);
    }
    info!(frames, last = ?last, "headless run finished");

    if let Some(path) = snapshot {
        save_png(&canvas, path)?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}

fn save_png(canvas: &PixelBuffer, path: &Path) -> Result<()> {
    let img = image::RgbImage::from_raw(canvas.width(), canvas.height(), canvas.as_rgb_bytes())
        .context("pixel buffer size does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}
