//! The particle population and its per-frame update.
//!
//! A frame applies every attractor in turn:
//! 1. [`ParticleField::attract`]: every particle takes one Euler step
//!    towards the attractor.
//! 2. Repeat for the next attractor, so velocity carries the pull of all
//!    rows while acceleration only reflects the most recent one.
//!
//! A frame without attractors falls back to [`ParticleField::coast`].

use glam::Vec2;
use rand::Rng;

use crate::{
    color::{Rgba, SpeedPalette},
    config::ForceParams,
    particle::Particle,
};

#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    force: ForceParams,
}

impl ParticleField {
    /// Scatters `count` particles uniformly over the canvas, at rest.
    ///
    /// ### Parameters
    /// - `count` - Number of particles; fixed for the lifetime of the field.
    /// - `canvas` - Canvas size; must be positive on both axes.
    /// - `force` - Magnetism, damping and cutoff used by every update.
    /// - `rng` - Source of the initial positions.
    pub fn scatter(count: usize, canvas: Vec2, force: ForceParams, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| {
                let x = rng.random_range(0.0..canvas.x);
                let y = rng.random_range(0.0..canvas.y);
                Particle::at_rest(Vec2::new(x, y))
            })
            .collect();

        Self { particles, force }
    }

    pub fn from_particles(particles: Vec<Particle>, force: ForceParams) -> Self {
        Self { particles, force }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advances every particle once against the attractor at `target`.
    pub fn attract(&mut self, target: Vec2) {
        for p in &mut self.particles {
            p.attract(target, &self.force);
        }
    }

    /// One force-free step: damping and drift only.
    pub fn coast(&mut self) {
        let damping = self.force.damping;
        for p in &mut self.particles {
            p.coast(damping);
        }
    }

    /// Applies every attractor in order, or coasts when there are none.
    pub fn advance(&mut self, targets: impl IntoIterator<Item = Vec2>) {
        let mut applied = 0usize;
        for target in targets {
            self.attract(target);
            applied += 1;
        }
        if applied == 0 {
            self.coast();
        }
    }

    /// Mean and maximum particle speed.
    pub fn speed_stats(&self) -> (f32, f32) {
        if self.particles.is_empty() {
            return (0.0, 0.0);
        }
        let (sum, max) = self
            .particles
            .iter()
            .map(Particle::speed)
            .fold((0.0_f32, 0.0_f32), |(s, m), v| (s + v, m.max(v)));
        (sum / self.particles.len() as f32, max)
    }

    /// Position and color of every particle, in index order.
    pub fn discs<'a>(
        &'a self,
        palette: &'a SpeedPalette,
    ) -> impl Iterator<Item = (Vec2, Rgba)> + 'a {
        self.particles
            .iter()
            .map(move |p| (p.pos, palette.color_for(p.speed())))
    }
}
