//! Core of the flash field visualization: particles pulled towards
//! geo-referenced lightning flashes.
//!
//! Main components:
//! - [`geo`]: geographic bounds and the mapping of rows onto the canvas.
//! - [`dataset`]: loader for the delimited flash table.
//! - [`attractor`]: the per-frame set of mapped attractors.
//! - [`particle`]: kinematic state and the single-attractor update.
//! - [`field`]: the particle population.
//! - [`color`]: speed-to-color palette.
//! - [`canvas`]: render target trait and a software raster.
//! - [`scene`]: frame driver used by the host loop.
//! - [`config`]: run configuration.
//! - [`error`]: configuration and dataset errors.

pub mod attractor;
pub mod canvas;
pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod field;
pub mod geo;
pub mod particle;
pub mod scene;
