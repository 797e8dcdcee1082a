//! Frame driver tying the dataset, the mapper and the particle field together.
//!
//! The host calls [`Scene::initialize`] once and then
//! [`Scene::advance_and_render`] once per display refresh. A frame:
//! 1. clears the canvas to the background color,
//! 2. maps every dataset row to an attractor,
//! 3. advances every particle against each attractor in row order,
//! 4. draws every particle as a low-alpha disc, additively.
//!
//! With [`DrawMode::Once`] step 4 runs after all attractors; with
//! [`DrawMode::PerAttractor`] the particles are drawn after each attractor.

use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use tracing::{info, warn};

use crate::{
    attractor::AttractorSet,
    canvas::Canvas,
    color::{Rgba, SpeedPalette},
    config::{DrawMode, FieldConfig},
    dataset::Dataset,
    error::ConfigError,
    field::ParticleField,
    geo::CoordinateMapper,
};

/// Summary of one completed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// 1-based index of the frame.
    pub frame: u64,
    pub attractors: usize,
    pub mean_speed: f32,
    pub max_speed: f32,
}

#[derive(Debug)]
pub struct Scene {
    field: ParticleField,
    mapper: CoordinateMapper,
    dataset: Arc<Dataset>,
    attractors: AttractorSet,
    palette: SpeedPalette,
    background: Rgba,
    radius: f32,
    draw_mode: DrawMode,
    frame: u64,
}

impl Scene {
    /// Validates `cfg` and `canvas`, then scatters the particles.
    ///
    /// ### Parameters
    /// - `cfg` - Run configuration; checked with [`FieldConfig::validate`].
    /// - `dataset` - Flash table shared read-only with the host.
    /// - `canvas` - Initial canvas size in pixels.
    /// - `rng` - Source of the initial particle positions.
    ///
    /// ### Returns
    /// The scene, or the first [`ConfigError`] found.
    pub fn initialize(
        cfg: &FieldConfig,
        dataset: Arc<Dataset>,
        canvas: Vec2,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mapper = CoordinateMapper::new(cfg.bounds, canvas)?;
        let field = ParticleField::scatter(cfg.particle_count, canvas, cfg.force(), rng);

        let mut attractors = AttractorSet::default();
        attractors.rebuild(&dataset, &mapper);
        {
            let mut off_canvas = attractors.off_canvas(&mapper);
            if dataset.is_empty() {
                warn!("dataset has no rows, particles will only coast");
            } else if let Some(first) = off_canvas.next() {
                warn!(
                    off_canvas = 1 + off_canvas.count(),
                    rows = dataset.len(),
                    first_lat = first.geo.lat,
                    first_lon = first.geo.lon,
                    "some flashes fall outside the configured bounds"
                );
            }
        }
        info!(
            particles = field.len(),
            rows = dataset.len(),
            width = canvas.x,
            height = canvas.y,
            draw_mode = ?cfg.draw_mode,
            "particle field initialized"
        );

        Ok(Self {
            field,
            mapper,
            dataset,
            attractors,
            palette: cfg.palette,
            background: cfg.background,
            radius: cfg.radius,
            draw_mode: cfg.draw_mode,
            frame: 0,
        })
    }

    /// Follows a canvas resize. Particles keep their positions; attractors
    /// are mapped onto the new size from the next frame on.
    pub fn resize(&mut self, canvas: Vec2) -> Result<(), ConfigError> {
        self.mapper.set_canvas(canvas)
    }

    pub fn canvas(&self) -> Vec2 {
        self.mapper.canvas()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn attractors(&self) -> &AttractorSet {
        &self.attractors
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Runs one frame and draws it onto `canvas`.
    pub fn advance_and_render(&mut self, canvas: &mut impl Canvas) -> FrameStats {
        canvas.clear(self.background);
        self.attractors.rebuild(&self.dataset, &self.mapper);

        match self.draw_mode {
            DrawMode::Once => {
                self.field.advance(self.attractors.positions());
                self.render(canvas);
            }
            DrawMode::PerAttractor => {
                if self.attractors.is_empty() {
                    self.field.coast();
                    self.render(canvas);
                }
                for target in self.attractors.positions() {
                    self.field.attract(target);
                    render_field(&self.field, &self.palette, self.radius, canvas);
                }
            }
        }

        self.frame += 1;
        let (mean_speed, max_speed) = self.field.speed_stats();
        FrameStats {
            frame: self.frame,
            attractors: self.attractors.len(),
            mean_speed,
            max_speed,
        }
    }

    fn render(&self, canvas: &mut impl Canvas) {
        render_field(&self.field, &self.palette, self.radius, canvas);
    }
}

fn render_field(
    field: &ParticleField,
    palette: &SpeedPalette,
    radius: f32,
    canvas: &mut impl Canvas,
) {
    for (pos, color) in field.discs(palette) {
        canvas.fill_disc(pos, radius, color);
    }
}
