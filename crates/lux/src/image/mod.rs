//! Pixel kinds, rasters and render targets.
//!
//! Elements are splatted onto an [`AnyImage`], which dispatches by pixel kind to a
//! type-matched [`Image::splat`]. Source images, masks and tints attached to an element
//! only take effect when their pixel kind matches the target's.
use std::sync::Arc;

use glam::{Vec2, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Bounds2;

pub mod pixel;
pub mod raster;
pub mod target;

pub use pixel::{MaskMode, Pixel, Ucolor};
pub use raster::Image;

/// Floating point RGB pixel.
pub type Frgb = Vec3;

/// Shared handle to a source image; elements and registries hold clones of it.
pub type ImageRef = Arc<AnyImage>;

/// Discriminant for the supported pixel representations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelKind {
    #[default]
    Frgb,
    Ucolor,
    Field,
}

/// A pixel value of any supported kind, used for element tints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyPixel {
    Frgb(Frgb),
    Ucolor(Ucolor),
    Field(Vec2),
}

impl AnyPixel {
    pub fn kind(&self) -> PixelKind {
        match self {
            AnyPixel::Frgb(_) => PixelKind::Frgb,
            AnyPixel::Ucolor(_) => PixelKind::Ucolor,
            AnyPixel::Field(_) => PixelKind::Field,
        }
    }
}

impl From<Frgb> for AnyPixel {
    fn from(value: Frgb) -> Self {
        AnyPixel::Frgb(value)
    }
}

impl From<Ucolor> for AnyPixel {
    fn from(value: Ucolor) -> Self {
        AnyPixel::Ucolor(value)
    }
}

impl From<Vec2> for AnyPixel {
    fn from(value: Vec2) -> Self {
        AnyPixel::Field(value)
    }
}

/// An image of any supported pixel kind.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyImage {
    Frgb(Image<Frgb>),
    Ucolor(Image<Ucolor>),
    Field(Image<Vec2>),
}

impl AnyImage {
    /// Create a blank image of the given kind covering `bounds`.
    pub fn new(kind: PixelKind, width: u32, height: u32, bounds: Bounds2) -> Self {
        match kind {
            PixelKind::Frgb => AnyImage::Frgb(Image::new(width, height).with_bounds(bounds)),
            PixelKind::Ucolor => AnyImage::Ucolor(Image::new(width, height).with_bounds(bounds)),
            PixelKind::Field => AnyImage::Field(Image::new(width, height).with_bounds(bounds)),
        }
    }

    pub fn kind(&self) -> PixelKind {
        match self {
            AnyImage::Frgb(_) => PixelKind::Frgb,
            AnyImage::Ucolor(_) => PixelKind::Ucolor,
            AnyImage::Field(_) => PixelKind::Field,
        }
    }

    /// Size as `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        match self {
            AnyImage::Frgb(img) => (img.width(), img.height()),
            AnyImage::Ucolor(img) => (img.width(), img.height()),
            AnyImage::Field(img) => (img.width(), img.height()),
        }
    }

    pub fn bounds(&self) -> Bounds2 {
        match self {
            AnyImage::Frgb(img) => img.bounds(),
            AnyImage::Ucolor(img) => img.bounds(),
            AnyImage::Field(img) => img.bounds(),
        }
    }

    pub fn as_frgb(&self) -> Option<&Image<Frgb>> {
        Frgb::image_of(self)
    }

    pub fn as_ucolor(&self) -> Option<&Image<Ucolor>> {
        Ucolor::image_of(self)
    }

    pub fn as_field(&self) -> Option<&Image<Vec2>> {
        Vec2::image_of(self)
    }
}

impl From<Image<Frgb>> for AnyImage {
    fn from(value: Image<Frgb>) -> Self {
        AnyImage::Frgb(value)
    }
}

impl From<Image<Ucolor>> for AnyImage {
    fn from(value: Image<Ucolor>) -> Self {
        AnyImage::Ucolor(value)
    }
}

impl From<Image<Vec2>> for AnyImage {
    fn from(value: Image<Vec2>) -> Self {
        AnyImage::Field(value)
    }
}
