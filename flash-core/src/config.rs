use serde::Deserialize;

use crate::{
    color::{Rgba, SpeedPalette},
    error::ConfigError,
    geo::GeoBounds,
};

/// How often each particle is drawn per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Once, after all attractors have been applied.
    #[default]
    Once,
    /// Once per attractor, right after each update. Brighter trails that
    /// scale with the number of rows.
    PerAttractor,
}

/// Parameters of the force applied by a single attractor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
    pub magnetism: f32,
    pub damping: f32,
    pub min_distance: f32,
}

/// Full configuration of a run. Missing YAML keys fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub bounds: GeoBounds,
    pub magnetism: f32,
    pub radius: f32,
    pub damping: f32,
    /// Below this distance the previous acceleration is kept.
    pub min_distance: f32,
    pub palette: SpeedPalette,
    pub background: Rgba,
    pub draw_mode: DrawMode,
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            bounds: GeoBounds::default(),
            magnetism: 10.0,
            radius: 1.0,
            damping: 0.95,
            min_distance: 3.0,
            palette: SpeedPalette::default(),
            background: Rgba::BLACK,
            draw_mode: DrawMode::default(),
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn force(&self) -> ForceParams {
        ForceParams {
            magnetism: self.magnetism,
            damping: self.damping,
            min_distance: self.min_distance,
        }
    }

    /// Checks every parameter the frame loop relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Radius(self.radius));
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(ConfigError::MinDistance(self.min_distance));
        }
        if !self.magnetism.is_finite() {
            return Err(ConfigError::Magnetism(self.magnetism));
        }
        self.palette.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn damping_must_be_a_fraction() {
        for damping in [0.0, 1.0, 1.5, -0.2, f32::NAN] {
            let cfg = FieldConfig {
                damping,
                ..FieldConfig::default()
            };
            assert!(
                matches!(cfg.validate(), Err(ConfigError::Damping(_))),
                "damping {damping} accepted"
            );
        }
    }

    #[test]
    fn degenerate_bounds_fail_validation() {
        let mut cfg = FieldConfig::default();
        cfg.bounds.y_max = cfg.bounds.y_min;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DegenerateBounds { axis: "y", .. })
        ));
    }

    #[test]
    fn radius_and_cutoff_are_checked() {
        let cfg = FieldConfig {
            radius: 0.0,
            ..FieldConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Radius(0.0)));

        let cfg = FieldConfig {
            min_distance: -1.0,
            ..FieldConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MinDistance(-1.0)));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "
magnetism: 25.0
draw_mode: per_attractor
bounds:
  x_min: 0.0
  x_max: 1.0
  y_min: 0.0
  y_max: 2.0
palette:
  alpha: 16
";
        let cfg: FieldConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.magnetism, 25.0);
        assert_eq!(cfg.draw_mode, DrawMode::PerAttractor);
        assert_eq!(cfg.bounds.y_max, 2.0);
        assert_eq!(cfg.palette.alpha, 16);
        assert_eq!(cfg.palette.speed_max, 5.0);
        assert_eq!(cfg.particle_count, 1000);
        assert_eq!(cfg.damping, 0.95);
        assert_eq!(cfg.seed, None);
    }
}
