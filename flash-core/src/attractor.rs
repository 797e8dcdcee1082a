use glam::Vec2;

use crate::{
    dataset::Dataset,
    geo::{CoordinateMapper, GeoPoint},
};

/// A dataset row together with its position on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attractor {
    pub geo: GeoPoint,
    pub pos: Vec2,
}

/// The attractors of the current frame, in dataset row order.
///
/// Rebuilt every frame from the read-only [`Dataset`]; the storage is
/// reused between frames.
#[derive(Debug, Default)]
pub struct AttractorSet {
    pub points: Vec<Attractor>,
}

impl AttractorSet {
    /// Replaces the contents with every dataset row mapped through `mapper`.
    pub fn rebuild(&mut self, dataset: &Dataset, mapper: &CoordinateMapper) {
        self.points.clear();
        self.points.extend(dataset.rows().iter().map(|&geo| Attractor {
            geo,
            pos: mapper.map(geo),
        }));
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(|a| a.pos)
    }

    /// Attractors that `mapper` places outside its canvas, in row order.
    pub fn off_canvas<'a>(
        &'a self,
        mapper: &'a CoordinateMapper,
    ) -> impl Iterator<Item = &'a Attractor> + 'a {
        self.points.iter().filter(|a| !mapper.on_canvas(a.pos))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
