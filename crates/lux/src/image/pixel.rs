//! Pixel arithmetic and mask compositing.
use std::fmt;

use glam::{Vec2, Vec3, Vec4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{AnyImage, AnyPixel, Image, PixelKind};

/// How a mask weights the source against the existing target pixel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaskMode {
    /// Interpolate from target to source by mask coverage.
    #[default]
    Blend,
    /// Add the source scaled by mask coverage.
    Additive,
    /// Replace the target wherever coverage reaches one half.
    Trim,
    /// Like blend, with coverage further scaled by the source's own coverage.
    Opacity,
}

impl MaskMode {
    /// Combine `src` into `dst` given a mask coverage in `[0, 1]`.
    pub fn composite<P: Pixel>(self, dst: P, src: P, coverage: f32) -> P {
        let coverage = coverage.clamp(0.0, 1.0);
        match self {
            MaskMode::Blend => dst.lerp(src, coverage),
            MaskMode::Additive => dst.add_scaled(src, coverage),
            MaskMode::Trim => {
                if coverage >= 0.5 {
                    src
                } else {
                    dst
                }
            }
            MaskMode::Opacity => dst.lerp(src, coverage * src.coverage().clamp(0.0, 1.0)),
        }
    }
}

/// Operations a pixel representation must support to be splatted.
pub trait Pixel: Copy + Default + fmt::Debug + PartialEq + 'static {
    const KIND: PixelKind;

    /// Linear interpolation towards `other`.
    fn lerp(self, other: Self, t: f32) -> Self;

    /// `self + other * t`.
    fn add_scaled(self, other: Self, t: f32) -> Self;

    /// Per-channel multiply by a tint.
    fn tinted(self, tint: Self) -> Self;

    /// Scalar weight of this pixel when used as a mask.
    fn coverage(self) -> f32;

    /// Borrow the typed image out of an [`AnyImage`] if the kinds match.
    fn image_of(image: &AnyImage) -> Option<&Image<Self>>;

    /// Extract a typed value out of an [`AnyPixel`] if the kinds match.
    fn from_any(pixel: &AnyPixel) -> Option<Self>;
}

impl Pixel for Vec3 {
    const KIND: PixelKind = PixelKind::Frgb;

    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    fn add_scaled(self, other: Self, t: f32) -> Self {
        self + other * t
    }

    #[inline]
    fn tinted(self, tint: Self) -> Self {
        self * tint
    }

    #[inline]
    fn coverage(self) -> f32 {
        self.element_sum() / 3.0
    }

    fn image_of(image: &AnyImage) -> Option<&Image<Self>> {
        match image {
            AnyImage::Frgb(img) => Some(img),
            _ => None,
        }
    }

    fn from_any(pixel: &AnyPixel) -> Option<Self> {
        match pixel {
            AnyPixel::Frgb(p) => Some(*p),
            _ => None,
        }
    }
}

impl Pixel for Vec2 {
    const KIND: PixelKind = PixelKind::Field;

    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    fn add_scaled(self, other: Self, t: f32) -> Self {
        self + other * t
    }

    #[inline]
    fn tinted(self, tint: Self) -> Self {
        self * tint
    }

    #[inline]
    fn coverage(self) -> f32 {
        self.length()
    }

    fn image_of(image: &AnyImage) -> Option<&Image<Self>> {
        match image {
            AnyImage::Field(img) => Some(img),
            _ => None,
        }
    }

    fn from_any(pixel: &AnyPixel) -> Option<Self> {
        match pixel {
            AnyPixel::Field(p) => Some(*p),
            _ => None,
        }
    }
}

/// Packed 8-bit ARGB color.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ucolor(pub u32);

impl Ucolor {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Ucolor(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    /// Channels in `[a, r, g, b]` order.
    pub const fn channels(self) -> [u8; 4] {
        let v = self.0;
        [(v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8]
    }

    /// Normalized channels as `(r, g, b, a)`.
    pub fn to_vec4(self) -> Vec4 {
        let [a, r, g, b] = self.channels();
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }

    /// Pack normalized `(r, g, b, a)` channels, clamping to `[0, 1]`.
    pub fn from_vec4(v: Vec4) -> Self {
        let c = (v.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
        Self::from_argb(c.w as u8, c.x as u8, c.y as u8, c.z as u8)
    }
}

impl fmt::Debug for Ucolor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ucolor({:#010x})", self.0)
    }
}

impl Pixel for Ucolor {
    const KIND: PixelKind = PixelKind::Ucolor;

    fn lerp(self, other: Self, t: f32) -> Self {
        let a = self.to_vec4();
        Self::from_vec4(a + (other.to_vec4() - a) * t)
    }

    fn add_scaled(self, other: Self, t: f32) -> Self {
        let sum = self.to_vec4() + other.to_vec4() * t;
        Self::from_vec4(sum.truncate().extend(self.to_vec4().w.max(other.to_vec4().w)))
    }

    fn tinted(self, tint: Self) -> Self {
        let own = self.to_vec4();
        Self::from_vec4((own.truncate() * tint.to_vec4().truncate()).extend(own.w))
    }

    fn coverage(self) -> f32 {
        let v = self.to_vec4();
        v.truncate().element_sum() / 3.0 * v.w
    }

    fn image_of(image: &AnyImage) -> Option<&Image<Self>> {
        match image {
            AnyImage::Ucolor(img) => Some(img),
            _ => None,
        }
    }

    fn from_any(pixel: &AnyPixel) -> Option<Self> {
        match pixel {
            AnyPixel::Ucolor(p) => Some(*p),
            _ => None,
        }
    }
}
