//! Full-window flash field rendered with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`Scene`] and implements
//! [`eframe::App`] to advance and draw it once per display refresh, and
//! [`EguiCanvas`], the [`Canvas`] adapter over an [`egui::Painter`].

use std::sync::Arc;

use eframe::App;
use flash_core::{
    canvas::Canvas,
    color::Rgba,
    config::FieldConfig,
    dataset::Dataset,
    error::ConfigError,
    scene::Scene,
};
use glam::Vec2;
use rand::rngs::StdRng;
use tracing::{debug, error};

use crate::{STATS_EVERY, seeded_rng};

/// Canvas-space position (origin top-left, y down) to egui screen space.
fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
}

/// egui blends premultiplied colors; a zero alpha makes the blend additive.
fn additive(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a).additive()
}

/// [`Canvas`] that records shapes on an egui painter clipped to `rect`.
pub struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }
}

impl Canvas for EguiCanvas<'_> {
    fn size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self, color: Rgba) {
        self.painter.rect_filled(
            self.rect,
            0.0,
            egui::Color32::from_rgb(color.r, color.g, color.b),
        );
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.painter
            .circle_filled(to_screen(center, self.rect), radius, additive(color));
    }
}

/// Main application state.
///
/// The scene is created lazily on the first frame, once the size of the
/// central panel is known, and follows the panel size afterwards.
///
/// ### Fields
/// - `cfg` - Validated run configuration.
/// - `dataset` - Flash table shared with the scene.
/// - `rng` - Source of the initial particle positions.
/// - `scene` - The running field; `None` until the first non-empty frame.
/// - `failed` - Set when the scene could not be created; nothing is drawn.
pub struct Viewer {
    cfg: FieldConfig,
    dataset: Arc<Dataset>,
    rng: StdRng,
    scene: Option<Scene>,
    failed: Option<ConfigError>,
}

impl Viewer {
    pub fn new(cfg: FieldConfig, dataset: Arc<Dataset>) -> Self {
        let rng = seeded_rng(cfg.seed);
        Self {
            cfg,
            dataset,
            rng,
            scene: None,
            failed: None,
        }
    }

    /// Returns the scene sized to `size`, creating or resizing it as needed.
    ///
    /// Returns `None` for an empty panel (e.g. a minimized window) and after
    /// a failed initialization.
    fn ensure_scene(&mut self, size: Vec2) -> Option<&mut Scene> {
        if self.failed.is_some() || !(size.x > 0.0 && size.y > 0.0) {
            return None;
        }

        match &mut self.scene {
            Some(scene) => {
                if scene.canvas() != size {
                    debug!(width = size.x, height = size.y, "canvas resized");
                    if let Err(e) = scene.resize(size) {
                        error!(error = %e, "ignoring resize");
                    }
                }
            }
            None => {
                match Scene::initialize(&self.cfg, self.dataset.clone(), size, &mut self.rng) {
                    Ok(scene) => self.scene = Some(scene),
                    Err(e) => {
                        error!(error = %e, "failed to initialize particle field");
                        self.failed = Some(e);
                        return None;
                    }
                }
            }
        }
        self.scene.as_mut()
    }
}

impl App for Viewer {
    /// Advances the field by one frame and draws it over the whole panel.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                if let Some(e) = &self.failed {
                    ui.colored_label(egui::Color32::LIGHT_RED, e.to_string());
                    return;
                }

                let painter = ui.painter_at(rect);
                let mut canvas = EguiCanvas::new(&painter, rect);
                if let Some(scene) = self.ensure_scene(canvas.size()) {
                    let stats = scene.advance_and_render(&mut canvas);
                    if stats.frame % STATS_EVERY == 0 {
                        debug!(?stats, "frame");
                    }
                }
            });

        ctx.request_repaint();
    }
}
