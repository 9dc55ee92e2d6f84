//! Render targets that receive generated elements.
//!
//! This module defines [`RenderTarget`] and a set of targets:
//! - [`AnyImage`] and [`Image`] splat each element into pixels.
//! - `()` discards elements; generation still runs in full.
//! - [`ElementLog`] records every element together with the depth of the cluster
//!   that produced it.
//! - [`FnTarget`] forwards to a closure.
use glam::Vec2;
use tracing::trace;

use super::{AnyImage, Image, Pixel};
use crate::generation::element::Element;

/// Something an element can be rendered onto.
pub trait RenderTarget {
    /// Render one element produced by a cluster at `depth` in the branch tree.
    fn render_element(&mut self, element: &Element, depth: u32);
}

/// No target: rendering is a no-op.
impl RenderTarget for () {
    #[inline]
    fn render_element(&mut self, _element: &Element, _depth: u32) {}
}

impl RenderTarget for AnyImage {
    fn render_element(&mut self, element: &Element, _depth: u32) {
        match self {
            AnyImage::Frgb(img) => splat_element(img, element),
            AnyImage::Ucolor(img) => splat_element(img, element),
            AnyImage::Field(img) => splat_element(img, element),
        }
    }
}

impl<P: Pixel> RenderTarget for Image<P> {
    fn render_element(&mut self, element: &Element, _depth: u32) {
        splat_element(self, element);
    }
}

/// Splat `element` onto a typed target, keeping only the image, mask and tint whose
/// pixel kind matches the target.
///
/// Mismatches are reported once per scene render by [`crate::scene::Scene::render`];
/// here they are only traced.
pub fn splat_element<P: Pixel>(target: &mut Image<P>, element: &Element) {
    let image = element.image.as_deref().and_then(P::image_of);
    let mask = element.mask.as_deref().and_then(P::image_of);
    let tint = element.tint.as_ref().and_then(|t| {
        let typed = P::from_any(t);
        if typed.is_none() {
            trace!(
                "Ignoring {:?} tint on element {} rendered onto a {:?} image.",
                t.kind(),
                element.index,
                P::KIND
            );
        }
        typed
    });

    target.splat(
        element.position,
        element.scale,
        element.effective_rotation(),
        image,
        mask,
        tint,
        element.mask_mode,
    );
}

/// An element captured by [`ElementLog`].
#[derive(Clone, Debug)]
pub struct RenderedElement {
    /// Snapshot of the element as rendered.
    pub element: Element,
    /// Depth of the cluster that produced it; top-level clusters are depth 0.
    pub depth: u32,
}

/// A render target that records every element in render order.
#[derive(Default, Debug)]
pub struct ElementLog {
    rendered: Vec<RenderedElement>,
}

impl ElementLog {
    pub fn new() -> Self {
        Self {
            rendered: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            rendered: Vec::with_capacity(cap),
        }
    }

    pub fn as_slice(&self) -> &[RenderedElement] {
        &self.rendered
    }

    pub fn clear(&mut self) {
        self.rendered.clear();
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    /// Positions of all recorded elements, in render order.
    pub fn positions(&self) -> Vec<Vec2> {
        self.rendered.iter().map(|r| r.element.position).collect()
    }

    /// Deepest cluster depth seen, or `None` if nothing was rendered.
    pub fn max_depth(&self) -> Option<u32> {
        self.rendered.iter().map(|r| r.depth).max()
    }

    /// Number of elements rendered by clusters at `depth`.
    pub fn count_at_depth(&self, depth: u32) -> usize {
        self.rendered.iter().filter(|r| r.depth == depth).count()
    }
}

impl RenderTarget for ElementLog {
    #[inline]
    fn render_element(&mut self, element: &Element, depth: u32) {
        self.rendered.push(RenderedElement {
            element: element.clone(),
            depth,
        });
    }
}

/// A render target that forwards each element to a closure.
pub struct FnTarget<F>
where
    F: FnMut(&Element, u32),
{
    f: F,
}

impl<F> FnTarget<F>
where
    F: FnMut(&Element, u32),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> RenderTarget for FnTarget<F>
where
    F: FnMut(&Element, u32),
{
    #[inline]
    fn render_element(&mut self, element: &Element, depth: u32) {
        (self.f)(element, depth);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3;

    use super::*;
    use crate::geometry::Bounds2;
    use crate::image::{AnyPixel, Frgb, PixelKind, Ucolor};

    fn stamped(element: &Element) -> Image<Frgb> {
        let mut target = AnyImage::new(PixelKind::Frgb, 4, 4, Bounds2::default());
        target.render_element(element, 0);
        target.as_frgb().cloned().expect("frgb target")
    }

    #[test]
    fn element_without_image_is_placeholder() {
        let img = stamped(&Element::default());
        assert!(img.pixels().iter().all(|p| *p == Vec3::ZERO));
    }

    #[test]
    fn matching_image_is_splatted() {
        let dot = Arc::new(AnyImage::from(Image::filled(1, 1, Vec3::ONE)));
        let element = Element::default().with_image(dot);
        let img = stamped(&element);
        assert!(img.pixels().iter().all(|p| *p == Vec3::ONE));
    }

    #[test]
    fn mismatched_image_kind_is_ignored() {
        let dot = Arc::new(AnyImage::from(Image::filled(1, 1, Ucolor::from_rgb(255, 0, 0))));
        let element = Element::default().with_image(dot);
        let img = stamped(&element);
        assert!(img.pixels().iter().all(|p| *p == Vec3::ZERO));
    }

    #[test]
    fn mismatched_tint_is_dropped_not_fatal() {
        let dot = Arc::new(AnyImage::from(Image::filled(1, 1, Vec3::ONE)));
        let element = Element::default()
            .with_image(dot)
            .with_tint(AnyPixel::Ucolor(Ucolor::from_rgb(0, 0, 0)));
        let img = stamped(&element);
        assert!(img.pixels().iter().all(|p| *p == Vec3::ONE));
    }

    #[test]
    fn element_log_records_depth_and_order() {
        let mut log = ElementLog::with_capacity(2);
        assert!(log.is_empty());
        log.render_element(&Element::default().with_position(Vec2::X), 0);
        log.render_element(&Element::default().with_position(Vec2::Y), 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.positions(), vec![Vec2::X, Vec2::Y]);
        assert_eq!(log.max_depth(), Some(2));
        assert_eq!(log.count_at_depth(0), 1);
        log.clear();
        assert_eq!(log.max_depth(), None);
    }

    #[test]
    fn fn_target_invokes_callback() {
        let mut count = 0;
        let mut target = FnTarget::new(|_element: &Element, _depth| {
            count += 1;
        });
        target.render_element(&Element::default(), 0);
        assert_eq!(count, 1);
    }
}
