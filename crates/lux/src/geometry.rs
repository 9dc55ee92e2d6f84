//! Bounding regions and small vector helpers shared by generation and rasterization.
//!
//! [`Bounds2`] is an axis-aligned region in world units. Generation pads it by the
//! current element scale before testing containment, and images use it to map
//! world positions onto pixels.
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding region in world units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl Bounds2 {
    /// Create a region spanning two arbitrary corners.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a region centered on `center` with the given half extents.
    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        Self::new(center - half_extent, center + half_extent)
    }

    /// Width and height of the region.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns `true` if the region has no area.
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Shrink the region by `amount` on every side; negative amounts grow it.
    ///
    /// The result may be inverted when `amount` exceeds half the size, in which case
    /// [`Bounds2::contains`] rejects every point.
    pub fn pad(&self, amount: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(amount),
            max: self.max - Vec2::splat(amount),
        }
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Containment test after padding by `amount`.
    #[inline]
    pub fn contains_padded(&self, p: Vec2, amount: f32) -> bool {
        self.pad(amount).contains(p)
    }
}

impl Default for Bounds2 {
    /// The unit square around the origin, `(-1, -1)..(1, 1)`.
    fn default() -> Self {
        Self::new(Vec2::NEG_ONE, Vec2::ONE)
    }
}

/// Rotate `v` counter-clockwise by `degrees`.
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}
