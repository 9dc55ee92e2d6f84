//! Clusters: one root element driven through a generation sequence.
use std::rc::Rc;

use tracing::debug;

use crate::generation::element::{Element, ElementContext};
use crate::generation::next_element::{NextElement, StepOutcome};
use crate::geometry::Bounds2;
use crate::image::target::RenderTarget;

pub const DEFAULT_MAX_DEPTH: u32 = 10;
pub const DEFAULT_MIN_SCALE: f32 = 0.001;

/// A root element plus the generator that advances it.
///
/// Scene-level clusters are templates. Branching behaviors clone one, move its root to
/// the live element and render the copy at a deeper `depth`.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub root: Element,
    pub next: Rc<NextElement>,
    /// Recursion level; top-level clusters are at depth 0.
    pub depth: u32,
    /// Branches deeper than this are dropped.
    pub max_depth: u32,
    /// Elements smaller than this end their sequence, and branches are dropped.
    pub min_scale: f32,
    /// Fallback region for generators without their own bounds.
    pub bounds: Option<Bounds2>,
}

impl Cluster {
    pub fn new(root: Element, next: Rc<NextElement>) -> Self {
        Self {
            root,
            next,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            min_scale: DEFAULT_MIN_SCALE,
            bounds: None,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_scale(mut self, min_scale: f32) -> Self {
        self.min_scale = min_scale;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds2) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Move the root to the geometry of `element`, keeping the root's appearance.
    pub fn set_root(&mut self, element: &Element) {
        self.root.take_geometry(element);
    }

    /// Returns `true` if a branch with this root scale and depth would be rendered.
    #[inline]
    pub fn admits(&self, scale: f32, depth: u32) -> bool {
        scale >= self.min_scale && depth <= self.max_depth
    }

    /// Render the root, then every element the generator produces, onto `target`.
    ///
    /// Returns how many elements this cluster rendered itself; elements rendered by
    /// branches spawned along the way are not counted.
    pub fn render(&self, target: &mut dyn RenderTarget, time: f32) -> usize {
        debug!(
            "Rendering cluster at depth {} from ({}, {}) with scale {}.",
            self.depth, self.root.position.x, self.root.position.y, self.root.scale
        );
        let mut element = self.root.clone();
        let mut ctx = ElementContext::new(&mut element, self, target, time);
        ctx.render();

        let mut rendered = 1usize;
        let reason = loop {
            match self.next.step(&mut ctx) {
                StepOutcome::Continue => {
                    ctx.render();
                    rendered += 1;
                }
                StepOutcome::Stop(reason) => break reason,
            }
        };

        debug!(
            "Cluster at depth {} rendered {} elements, stopped by {:?}.",
            self.depth, rendered, reason
        );
        rendered
    }
}
