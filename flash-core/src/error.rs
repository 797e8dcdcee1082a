//! Error types for setup and dataset loading.
//!
//! Everything that can fail happens before the first frame: validating a
//! [`crate::config::FieldConfig`], sizing the canvas, and parsing the flash
//! dataset. The per-frame update itself is infallible.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid configuration or canvas, reported at initialization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min == max` on one axis of the geographic box, or a bound is NaN/inf.
    #[error("degenerate {axis} bounds: min = {min}, max = {max}")]
    DegenerateBounds {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("damping must lie in (0, 1), got {0}")]
    Damping(f32),

    #[error("particle radius must be positive, got {0}")]
    Radius(f32),

    #[error("minimum force distance must be finite and non-negative, got {0}")]
    MinDistance(f32),

    #[error("magnetism must be finite, got {0}")]
    Magnetism(f32),

    #[error("speed range of the palette must be positive, got {0}")]
    SpeedRange(f32),

    /// A color channel whose lower end exceeds its upper end.
    #[error("{channel} channel range is inverted: {min} > {max}")]
    ChannelRange {
        channel: &'static str,
        min: u8,
        max: u8,
    },

    #[error("canvas must have a positive, finite size, got {width}x{height}")]
    Canvas { width: f32, height: f32 },
}

/// Failure while reading the delimited flash table.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Same as [`DatasetError::Io`] for readers without a path.
    #[error("failed to read dataset: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: missing field in column {column}")]
    MissingField { line: usize, column: usize },

    #[error("line {line}, column {column}: {value:?} is not a number")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("line {line}, column {column}: value is not finite")]
    NonFinite { line: usize, column: usize },
}
