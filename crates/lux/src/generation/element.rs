//! Elements and the per-step context handed to every behavior.
use glam::Vec2;

use crate::generation::cluster::Cluster;
use crate::image::target::RenderTarget;
use crate::image::{AnyPixel, ImageRef, MaskMode};

/// One renderable instance: a positioned, scaled, rotated image stamp.
///
/// Image, mask and tint are shared references; an element without an image is a valid
/// placeholder that occupies an index slot but renders nothing.
#[derive(Clone, Debug)]
pub struct Element {
    /// Center in world coordinates.
    pub position: Vec2,
    /// Radius in world units, never negative.
    pub scale: f32,
    /// Image rotation in degrees.
    pub rotation: f32,
    /// Direction of travel in degrees.
    pub orientation: f32,
    /// Whether the rendered rotation adds `orientation`.
    pub orientation_lock: bool,
    /// Position within the current generation sequence.
    pub index: u32,
    pub mask_mode: MaskMode,
    pub image: Option<ImageRef>,
    pub mask: Option<ImageRef>,
    /// Must match the target's pixel kind to take effect.
    pub tint: Option<AnyPixel>,
    /// Motion applied by the most recent successful step.
    pub derivative: Vec2,
    /// When set, steps leave `derivative` untouched instead of recomputing it from the
    /// position change, so it keeps whatever value the root or a generator gave it.
    pub derivative_lock: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            orientation: 0.0,
            orientation_lock: false,
            index: 0,
            mask_mode: MaskMode::Blend,
            image: None,
            mask: None,
            tint: None,
            derivative: Vec2::ZERO,
            derivative_lock: false,
        }
    }
}

impl Element {
    pub fn new(position: Vec2, scale: f32) -> Self {
        Self {
            position,
            scale: scale.max(0.0),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the radius; negative values clamp to zero.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.max(0.0);
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_orientation(mut self, degrees: f32, lock: bool) -> Self {
        self.orientation = degrees;
        self.orientation_lock = lock;
        self
    }

    pub fn with_derivative(mut self, derivative: Vec2, lock: bool) -> Self {
        self.derivative = derivative;
        self.derivative_lock = lock;
        self
    }

    pub fn with_mask_mode(mut self, mode: MaskMode) -> Self {
        self.mask_mode = mode;
        self
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_mask(mut self, mask: ImageRef) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_tint(mut self, tint: impl Into<AnyPixel>) -> Self {
        self.tint = Some(tint.into());
        self
    }

    /// Rotation used when splatting: `rotation`, plus `orientation` when locked.
    #[inline]
    pub fn effective_rotation(&self) -> f32 {
        if self.orientation_lock {
            self.rotation + self.orientation
        } else {
            self.rotation
        }
    }

    /// Copy the geometric state of `other` and restart the index.
    ///
    /// Image, mask, tint and mask mode are kept, so a branch inherits its cluster
    /// template's appearance but the parent's position and motion.
    pub fn take_geometry(&mut self, other: &Element) {
        self.position = other.position;
        self.scale = other.scale;
        self.rotation = other.rotation;
        self.orientation = other.orientation;
        self.orientation_lock = other.orientation_lock;
        self.derivative = other.derivative;
        self.derivative_lock = other.derivative_lock;
        self.index = 0;
    }
}

/// Borrowed state for one generation step: the live element, its owning cluster,
/// the render target and the current time.
///
/// Built on the stack by [`Cluster::render`] and never stored.
pub struct ElementContext<'a> {
    pub element: &'a mut Element,
    pub cluster: &'a Cluster,
    pub target: &'a mut dyn RenderTarget,
    pub time: f32,
}

impl<'a> ElementContext<'a> {
    pub fn new(
        element: &'a mut Element,
        cluster: &'a Cluster,
        target: &'a mut dyn RenderTarget,
        time: f32,
    ) -> Self {
        Self {
            element,
            cluster,
            target,
            time,
        }
    }

    /// Render the live element onto the target at the cluster's depth.
    #[inline]
    pub fn render(&mut self) {
        self.target.render_element(&*self.element, self.cluster.depth);
    }
}
