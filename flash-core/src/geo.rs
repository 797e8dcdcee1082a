//! Geographic coordinates and the mapping onto the canvas.
//!
//! Dataset rows carry latitude in column 0 and longitude in column 1.
//! [`CoordinateMapper`] rescales them affinely into pixels: longitude
//! drives `x`, latitude drives `y`. Nothing is clamped, so a flash outside
//! the bounding box becomes an attractor outside the canvas.

use glam::Vec2;
use serde::Deserialize;

use crate::error::ConfigError;

/// One dataset row, as read from columns 0 (`lat`) and 1 (`lon`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Geographic box mapped onto the full canvas.
///
/// `x_*` bound the longitude, `y_*` bound the latitude.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeoBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self {
            x_min: -73.99,
            x_max: -38.86,
            y_min: -28.63,
            y_max: 20.29,
        }
    }
}

impl GeoBounds {
    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn enclosing(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            x_min: first.lon,
            x_max: first.lon,
            y_min: first.lat,
            y_max: first.lat,
        };
        Some(points.iter().fold(init, |b, p| Self {
            x_min: b.x_min.min(p.lon),
            x_max: b.x_max.max(p.lon),
            y_min: b.y_min.min(p.lat),
            y_max: b.y_max.max(p.lat),
        }))
    }

    /// Rejects boxes that would divide by zero (or by NaN) when mapping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_axis("x", self.x_min, self.x_max)?;
        check_axis("y", self.y_min, self.y_max)
    }
}

fn check_axis(axis: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    let span = max - min;
    if !span.is_finite() || span == 0.0 {
        return Err(ConfigError::DegenerateBounds { axis, min, max });
    }
    Ok(())
}

/// Checks that a canvas size can host particles.
pub(crate) fn validate_canvas(size: Vec2) -> Result<(), ConfigError> {
    if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Canvas {
            width: size.x,
            height: size.y,
        })
    }
}

/// Affine map from [`GeoPoint`] to canvas pixels.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    bounds: GeoBounds,
    canvas: Vec2,
}

impl CoordinateMapper {
    /// Builds a mapper, validating both the bounds and the canvas size.
    ///
    /// ### Parameters
    /// - `bounds` - Geographic box that should fill the canvas.
    /// - `canvas` - Canvas width and height in pixels.
    ///
    /// ### Returns
    /// The mapper, or a [`ConfigError`] if either axis of `bounds` is
    /// degenerate or the canvas is empty.
    pub fn new(bounds: GeoBounds, canvas: Vec2) -> Result<Self, ConfigError> {
        bounds.validate()?;
        validate_canvas(canvas)?;
        Ok(Self { bounds, canvas })
    }

    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Vec2) -> Result<(), ConfigError> {
        validate_canvas(canvas)?;
        self.canvas = canvas;
        Ok(())
    }

    /// Maps one row to its attractor position.
    ///
    /// `x` comes from the longitude (column 1) and `y` from the latitude
    /// (column 0).
    pub fn map(&self, point: GeoPoint) -> Vec2 {
        let b = &self.bounds;
        let tx = (point.lon - b.x_min) / (b.x_max - b.x_min) * self.canvas.x as f64;
        let ty = (point.lat - b.y_min) / (b.y_max - b.y_min) * self.canvas.y as f64;
        Vec2::new(tx as f32, ty as f32)
    }

    /// Whether a mapped position falls on the canvas.
    pub fn on_canvas(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= self.canvas.x && pos.y <= self.canvas.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(w: f32, h: f32) -> CoordinateMapper {
        CoordinateMapper::new(GeoBounds::default(), Vec2::new(w, h)).unwrap()
    }

    #[test]
    fn lower_corner_maps_to_origin() {
        let m = mapper(1280.0, 720.0);
        let p = m.map(GeoPoint::new(-28.63, -73.99));
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn upper_corner_maps_to_canvas_size() {
        let m = mapper(1280.0, 720.0);
        let p = m.map(GeoPoint::new(20.29, -38.86));
        assert!((p.x - 1280.0).abs() < 1e-3, "x = {}", p.x);
        assert!((p.y - 720.0).abs() < 1e-3, "y = {}", p.y);
    }

    #[test]
    fn longitude_drives_x_and_latitude_drives_y() {
        let bounds = GeoBounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 100.0,
        };
        let m = CoordinateMapper::new(bounds, Vec2::new(100.0, 100.0)).unwrap();

        // lat = 50 is halfway in y, lon = 2 is a fifth of the way in x.
        let p = m.map(GeoPoint::new(50.0, 2.0));
        assert_eq!(p, Vec2::new(20.0, 50.0));
    }

    #[test]
    fn out_of_bounds_rows_are_not_clamped() {
        let bounds = GeoBounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        };
        let m = CoordinateMapper::new(bounds, Vec2::new(100.0, 50.0)).unwrap();

        let p = m.map(GeoPoint::new(-1.0, 2.0));
        assert_eq!(p, Vec2::new(200.0, -50.0));
        assert!(!m.on_canvas(p));
    }

    #[test]
    fn mapping_is_affine_between_corners() {
        let m = mapper(1000.0, 500.0);
        let b = m.bounds();
        let lo = m.map(GeoPoint::new(b.y_min, b.x_min));
        let hi = m.map(GeoPoint::new(b.y_max, b.x_max));
        let mid = m.map(GeoPoint::new(
            (b.y_min + b.y_max) / 2.0,
            (b.x_min + b.x_max) / 2.0,
        ));
        let expected = (lo + hi) / 2.0;
        assert!((mid - expected).length() < 1e-3);
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let flat_x = GeoBounds {
            x_max: -73.99,
            ..GeoBounds::default()
        };
        assert!(matches!(
            CoordinateMapper::new(flat_x, Vec2::new(10.0, 10.0)),
            Err(ConfigError::DegenerateBounds { axis: "x", .. })
        ));

        let nan_y = GeoBounds {
            y_min: f64::NAN,
            ..GeoBounds::default()
        };
        assert!(matches!(
            nan_y.validate(),
            Err(ConfigError::DegenerateBounds { axis: "y", .. })
        ));
    }

    #[test]
    fn empty_canvas_is_rejected() {
        let err = CoordinateMapper::new(GeoBounds::default(), Vec2::new(0.0, 600.0)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Canvas {
                width: 0.0,
                height: 600.0
            }
        );

        let mut m = mapper(10.0, 10.0);
        assert!(m.set_canvas(Vec2::new(f32::INFINITY, 1.0)).is_err());
        assert_eq!(m.canvas(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn enclosing_bounds_cover_all_points() {
        assert_eq!(GeoBounds::enclosing(&[]), None);

        let points = [
            GeoPoint::new(-10.0, -50.0),
            GeoPoint::new(5.0, -60.0),
            GeoPoint::new(0.0, -40.0),
        ];
        let b = GeoBounds::enclosing(&points).unwrap();
        assert_eq!(
            b,
            GeoBounds {
                x_min: -60.0,
                x_max: -40.0,
                y_min: -10.0,
                y_max: 5.0,
            }
        );
    }
}
