//! Raster storage and the splat primitive.
//!
//! An [`Image`] covers a world-space [`Bounds2`] with row 0 at the top (`max.y`).
//! [`Image::splat`] stamps a rotated, scaled source image with nearest sampling.
use std::f32::consts::SQRT_2;

use glam::Vec2;

use super::pixel::{MaskMode, Pixel};
use crate::error::{Error, Result};
use crate::geometry::{rotate_deg, Bounds2};

/// A 2D grid of pixels spanning a region of world space.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<P> {
    width: u32,
    height: u32,
    bounds: Bounds2,
    data: Vec<P>,
}

impl<P: Pixel> Image<P> {
    /// Create an image filled with the default pixel, covering the unit square.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, P::default())
    }

    /// Create an image filled with `pixel`.
    pub fn filled(width: u32, height: u32, pixel: P) -> Self {
        Self {
            width,
            height,
            bounds: Bounds2::default(),
            data: vec![pixel; (width as usize) * (height as usize)],
        }
    }

    /// Create an image from row-major pixel data.
    pub fn from_pixels(width: u32, height: u32, data: Vec<P>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidConfig(format!(
                "image data has {} pixels, expected {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            bounds: Bounds2::default(),
            data,
        })
    }

    /// Set the world-space region covered by the image.
    pub fn with_bounds(mut self, bounds: Bounds2) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn set_bounds(&mut self, bounds: Bounds2) {
        self.bounds = bounds;
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Returns `true` if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn pixels(&self) -> &[P] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get the pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<P> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Set the pixel at `(x, y)`; writes outside the image are ignored.
    pub fn set(&mut self, x: u32, y: u32, pixel: P) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = pixel;
        }
    }

    pub fn fill(&mut self, pixel: P) {
        self.data.fill(pixel);
    }

    /// Map a world position to continuous pixel coordinates.
    pub fn world_to_pixel(&self, p: Vec2) -> Vec2 {
        let size = self.bounds.size();
        Vec2::new(
            (p.x - self.bounds.min.x) / size.x * self.width as f32,
            (self.bounds.max.y - p.y) / size.y * self.height as f32,
        )
    }

    /// World position of the center of pixel `(x, y)`.
    pub fn pixel_center(&self, x: u32, y: u32) -> Vec2 {
        let size = self.bounds.size();
        Vec2::new(
            self.bounds.min.x + (x as f32 + 0.5) / self.width as f32 * size.x,
            self.bounds.max.y - (y as f32 + 0.5) / self.height as f32 * size.y,
        )
    }

    /// Nearest sample at normalized coordinates, `(0, 0)` top-left, clamped to the edges.
    pub fn sample_uv(&self, uv: Vec2) -> P {
        if self.is_empty() {
            return P::default();
        }
        let x = ((uv.x * self.width as f32).floor() as i64).clamp(0, self.width as i64 - 1);
        let y = ((uv.y * self.height as f32).floor() as i64).clamp(0, self.height as i64 - 1);
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Stamp `image` centered at `position` with radius `scale`, rotated by `rotation` degrees.
    ///
    /// An absent source image renders nothing. An absent mask gives full coverage and an
    /// absent tint leaves the source untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn splat(
        &mut self,
        position: Vec2,
        scale: f32,
        rotation: f32,
        image: Option<&Image<P>>,
        mask: Option<&Image<P>>,
        tint: Option<P>,
        mode: MaskMode,
    ) {
        let Some(source) = image else {
            return;
        };
        if scale.is_nan()
            || scale <= 0.0
            || self.is_empty()
            || source.is_empty()
            || self.bounds.is_empty()
        {
            return;
        }

        let reach = scale * SQRT_2;
        let top_left = self.world_to_pixel(position + Vec2::new(-reach, reach));
        let bottom_right = self.world_to_pixel(position + Vec2::new(reach, -reach));
        let x0 = top_left.x.floor().max(0.0) as u32;
        let y0 = top_left.y.floor().max(0.0) as u32;
        let x1 = bottom_right.x.ceil().clamp(0.0, self.width as f32) as u32;
        let y1 = bottom_right.y.ceil().clamp(0.0, self.height as f32) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let local = rotate_deg(self.pixel_center(x, y) - position, -rotation) / scale;
                if local.x.abs() > 1.0 || local.y.abs() > 1.0 {
                    continue;
                }
                let uv = Vec2::new((local.x + 1.0) * 0.5, (1.0 - local.y) * 0.5);

                let mut src = source.sample_uv(uv);
                if let Some(t) = tint {
                    src = src.tinted(t);
                }
                let coverage = mask.map_or(1.0, |m| m.sample_uv(uv).coverage());

                let i = (y as usize) * (self.width as usize) + (x as usize);
                self.data[i] = mode.composite(self.data[i], src, coverage);
            }
        }
    }
}
