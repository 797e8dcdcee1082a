//! Render targets for the particle field.
//!
//! The frame loop only needs three primitives: a solid clear, a filled disc,
//! and additive compositing of those discs. [`Canvas`] captures exactly that,
//! so the same [`crate::scene::Scene`] drives the egui window and the
//! software [`PixelBuffer`] used for headless runs and tests.

use glam::Vec2;

use crate::color::Rgba;

/// A 2D raster with additive disc compositing.
pub trait Canvas {
    /// Width and height in pixels.
    fn size(&self) -> Vec2;

    /// Overwrites every pixel with `color`, ignoring its alpha.
    fn clear(&mut self, color: Rgba);

    /// Adds `color * color.a / 255` to every pixel covered by the disc.
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgba);
}

/// Software RGB canvas.
///
/// A pixel is covered by a disc when its center lies within `radius` of the
/// disc center. Channels saturate at 255.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    /// Row-major RGB bytes, three per pixel.
    pub fn as_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Canvas for PixelBuffer {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill([color.r, color.g, color.b]);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if !center.is_finite() || radius <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor().max(0.0);
        let y0 = (center.y - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(self.width as f32);
        let y1 = (center.y + radius).ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let alpha = color.a as u16;
        let add = [color.r, color.g, color.b].map(|c| ((c as u16 * alpha + 127) / 255) as u8);
        let r2 = radius * radius;

        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() > r2 {
                    continue;
                }
                let idx = self.index(x, y);
                let px = &mut self.pixels[idx];
                for (dst, src) in px.iter_mut().zip(add) {
                    *dst = dst.saturating_add(src);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_is_opaque() {
        let mut buf = PixelBuffer::new(4, 3);
        buf.fill_disc(Vec2::new(2.0, 1.5), 5.0, Rgba::new(255, 255, 255, 255));
        buf.clear(Rgba::new(10, 20, 30, 0));
        assert!(buf.as_rgb_bytes().chunks(3).all(|px| px == [10, 20, 30]));
    }

    #[test]
    fn discs_add_up_and_saturate() {
        let mut buf = PixelBuffer::new(8, 8);
        buf.clear(Rgba::BLACK);
        let color = Rgba::new(255, 128, 0, 32);

        buf.fill_disc(Vec2::new(4.0, 4.0), 1.0, color);
        // 255 * 32 / 255 = 32, 128 * 32 / 255 ~ 16.06
        assert_eq!(buf.pixel(3, 3), Some([32, 16, 0]));

        buf.fill_disc(Vec2::new(4.0, 4.0), 1.0, color);
        assert_eq!(buf.pixel(3, 3), Some([64, 32, 0]));

        for _ in 0..20 {
            buf.fill_disc(Vec2::new(4.0, 4.0), 1.0, color);
        }
        assert_eq!(buf.pixel(3, 3), Some([255, 255, 0]));
    }

    #[test]
    fn disc_covers_pixel_centers_within_radius() {
        let mut buf = PixelBuffer::new(8, 8);
        buf.fill_disc(Vec2::new(4.0, 4.0), 1.0, Rgba::new(255, 255, 255, 255));

        // The four pixels around (4, 4) have centers at distance ~0.71.
        for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            assert_eq!(buf.pixel(x, y), Some([255; 3]), "({x}, {y})");
        }
        // Centers at distance ~1.58 are outside.
        assert_eq!(buf.pixel(5, 4), Some([0; 3]));
        assert_eq!(buf.pixel(2, 2), Some([0; 3]));
    }

    #[test]
    fn off_canvas_discs_are_ignored() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_disc(Vec2::new(-10.0, 2.0), 1.0, Rgba::new(255, 255, 255, 255));
        buf.fill_disc(Vec2::new(2.0, 100.0), 1.0, Rgba::new(255, 255, 255, 255));
        buf.fill_disc(Vec2::new(f32::NAN, 2.0), 1.0, Rgba::new(255, 255, 255, 255));
        assert!(buf.as_rgb_bytes().iter().all(|&c| c == 0));
        assert_eq!(buf.pixel(4, 0), None);
    }
}
