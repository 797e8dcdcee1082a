use glam::Vec2;

use crate::config::ForceParams;

/// Kinematic state of one particle.
///
/// Acceleration is part of the state: it is only recomputed when the
/// particle is farther than [`ForceParams::min_distance`] from the
/// attractor, otherwise the last value keeps acting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
}

impl Particle {
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Applies one attractor and advances one explicit Euler step.
    ///
    /// Acceleration is `magnetism * (target - pos) / d²` when `d` exceeds
    /// the cutoff, and left untouched otherwise. Velocity then picks up the
    /// acceleration, is damped, and moves the particle.
    #[inline]
    pub fn attract(&mut self, target: Vec2, force: &ForceParams) {
        let d = self.pos.distance(target);
        if d > force.min_distance {
            self.acc = force.magnetism * (target - self.pos) / (d * d);
        }
        self.vel += self.acc;
        self.integrate(force.damping);
    }

    /// Damping and position update without any force.
    #[inline]
    pub fn coast(&mut self, damping: f32) {
        self.integrate(damping);
    }

    #[inline]
    fn integrate(&mut self, damping: f32) {
        self.vel *= damping;
        self.pos += self.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn force() -> ForceParams {
        ForceParams {
            magnetism: 10.0,
            damping: 0.95,
            min_distance: 3.0,
        }
    }

    #[test]
    fn far_attractor_sets_inverse_square_acceleration() {
        let mut p = Particle::at_rest(Vec2::new(0.0, 0.0));
        p.attract(Vec2::new(30.0, 40.0), &force());

        // d = 50, so acc = 10 * (30, 40) / 2500.
        assert!((p.acc - Vec2::new(0.12, 0.16)).length() < 1e-6);
        assert!((p.vel - Vec2::new(0.12, 0.16) * 0.95).length() < 1e-6);
        assert_eq!(p.pos, p.vel);
    }

    #[test]
    fn close_attractor_freezes_acceleration() {
        let previous = Vec2::new(-0.25, 0.5);
        let mut p = Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, 0.0),
            acc: previous,
        };

        // Distance exactly at the cutoff is still frozen.
        p.attract(Vec2::new(13.0, 10.0), &force());
        assert_eq!(p.acc.x.to_bits(), previous.x.to_bits());
        assert_eq!(p.acc.y.to_bits(), previous.y.to_bits());

        // Integration still happens with the kept acceleration.
        let vel = (Vec2::new(1.0, 0.0) + previous) * 0.95;
        assert_eq!(p.vel, vel);
        assert_eq!(p.pos, Vec2::new(10.0, 10.0) + vel);
    }

    #[test]
    fn particle_on_top_of_attractor_stays_finite() {
        let mut p = Particle::at_rest(Vec2::new(5.0, 5.0));
        p.attract(Vec2::new(5.0, 5.0), &force());
        assert!(p.pos.is_finite() && p.vel.is_finite() && p.acc.is_finite());
        assert_eq!(p.acc, Vec2::ZERO);
    }

    #[test]
    fn coasting_decays_velocity_geometrically() {
        let v0 = Vec2::new(3.0, -4.0);
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: v0,
            acc: Vec2::ZERO,
        };
        let damping = 0.95_f32;

        for k in 1..=200 {
            p.coast(damping);
            let bound = v0.length() * damping.powi(k);
            assert!(
                p.speed() <= bound * (1.0 + 1e-4),
                "step {k}: |v| = {}, bound = {bound}",
                p.speed()
            );
        }
    }
}
