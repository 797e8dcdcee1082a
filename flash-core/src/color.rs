//! Speed-to-color mapping.
//!
//! Slow particles are a dim blue, fast ones saturate towards white. Each
//! channel is a clamped linear remap of the particle speed.

use serde::Deserialize;

use crate::error::ConfigError;

/// 8-bit color with unmultiplied alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Output range of a single channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Value at fraction `t` of the range; `t` must already be in `[0, 1]`.
    fn lerp(&self, t: f32) -> u8 {
        let lo = self.min as f32;
        let hi = self.max as f32;
        (lo + (hi - lo) * t).round().clamp(lo, hi) as u8
    }
}

/// Maps speed in `[0, speed_max]` onto the three channel ranges.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeedPalette {
    pub speed_max: f32,
    pub red: ChannelRange,
    pub green: ChannelRange,
    pub blue: ChannelRange,
    /// Constant alpha of every disc; low values build up trails additively.
    pub alpha: u8,
}

impl Default for SpeedPalette {
    fn default() -> Self {
        Self {
            speed_max: 5.0,
            red: ChannelRange::new(0, 255),
            green: ChannelRange::new(64, 255),
            blue: ChannelRange::new(128, 255),
            alpha: 32,
        }
    }
}

impl SpeedPalette {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed_max.is_finite() && self.speed_max > 0.0) {
            return Err(ConfigError::SpeedRange(self.speed_max));
        }
        for (channel, range) in [("red", self.red), ("green", self.green), ("blue", self.blue)] {
            if range.min > range.max {
                return Err(ConfigError::ChannelRange {
                    channel,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Color of a particle moving at `speed`.
    ///
    /// Speeds outside `[0, speed_max]` clamp to the ends of each channel
    /// range. A NaN speed is treated as zero.
    pub fn color_for(&self, speed: f32) -> Rgba {
        let t = (speed / self.speed_max).clamp(0.0, 1.0);
        let t = if t.is_nan() { 0.0 } else { t };
        Rgba::new(
            self.red.lerp(t),
            self.green.lerp(t),
            self.blue.lerp(t),
            self.alpha,
        )
    }
}
