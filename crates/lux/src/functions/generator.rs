//! Generator behaviors: mutate the live element in place and signal whether to continue.
//!
//! All behaviors here always continue; sequences end through the limits checked by
//! [`crate::generation::next_element::NextElement::step`].
use glam::Vec2;
use tracing::{trace, warn};

use crate::functions::GeneratorFunction;
use crate::generation::element::ElementContext;
use crate::geometry::rotate_deg;
use crate::harness::Harness;

/// Sets the element's orientation.
#[derive(Debug)]
pub struct OrientationGen {
    pub orientation: Harness<f32>,
}

impl OrientationGen {
    pub fn new(orientation: impl Into<Harness<f32>>) -> Self {
        Self {
            orientation: orientation.into(),
        }
    }

    pub fn reset(&self) {
        self.orientation.reset();
    }
}

impl GeneratorFunction for OrientationGen {
    fn call(&self, ctx: &mut ElementContext<'_>) -> bool {
        ctx.element.orientation = self.orientation.evaluate(ctx);
        true
    }
}

/// Sets the element's scale, clamped to be non-negative.
#[derive(Debug)]
pub struct ScaleGen {
    pub scale: Harness<f32>,
}

impl ScaleGen {
    pub fn new(scale: impl Into<Harness<f32>>) -> Self {
        Self {
            scale: scale.into(),
        }
    }

    pub fn reset(&self) {
        self.scale.reset();
    }
}

impl GeneratorFunction for ScaleGen {
    fn call(&self, ctx: &mut ElementContext<'_>) -> bool {
        ctx.element.scale = self.scale.evaluate(ctx).max(0.0);
        true
    }
}

/// Moves the element by `flow * step`, times the element's scale when `proportional`.
#[derive(Debug)]
pub struct AdvectElement {
    pub flow: Harness<Vec2>,
    pub step: Harness<f32>,
    pub proportional: bool,
}

impl AdvectElement {
    pub fn new(flow: impl Into<Harness<Vec2>>, step: impl Into<Harness<f32>>) -> Self {
        Self {
            flow: flow.into(),
            step: step.into(),
            proportional: false,
        }
    }

    pub fn proportional(mut self, proportional: bool) -> Self {
        self.proportional = proportional;
        self
    }

    pub fn reset(&self) {
        self.flow.reset();
        self.step.reset();
    }
}

impl GeneratorFunction for AdvectElement {
    fn call(&self, ctx: &mut ElementContext<'_>) -> bool {
        let flow = self.flow.evaluate(ctx);
        let step = self.step.evaluate(ctx);
        let element = &mut *ctx.element;
        let mut delta = flow * step;
        if self.proportional {
            delta *= element.scale;
        }
        element.position += delta;
        true
    }
}

/// Turns the element by `curliness / scale` degrees per step.
///
/// Zero-scale elements are left unchanged.
#[derive(Debug)]
pub struct Curly {
    pub curliness: Harness<f32>,
}

impl Curly {
    pub fn new(curliness: impl Into<Harness<f32>>) -> Self {
        Self {
            curliness: curliness.into(),
        }
    }

    pub fn reset(&self) {
        self.curliness.reset();
    }
}

impl GeneratorFunction for Curly {
    fn call(&self, ctx: &mut ElementContext<'_>) -> bool {
        let curliness = self.curliness.evaluate(ctx);
        let element = &mut *ctx.element;
        if element.scale > 0.0 {
            element.orientation += curliness / element.scale;
        }
        true
    }
}

/// Places the element at `positions[index]`; indices past the end leave it in place.
#[derive(Debug)]
pub struct PositionList {
    pub positions: Harness<Vec<Vec2>>,
}

impl PositionList {
    pub fn new(positions: impl Into<Harness<Vec<Vec2>>>) -> Self {
        Self {
            positions: positions.into(),
        }
    }

    pub fn reset(&self) {
        self.positions.reset();
    }
}

impl GeneratorFunction for PositionList {
    fn call(&self, ctx: &mut ElementContext<'_>) -> bool {
        let positions = self.positions.evaluate(ctx);
        if let Some(p) = positions.get(ctx.element.index as usize) {
            ctx.element.position = *p;
        }
        true
    }
}

/// Spawns a branch cluster from the live element at regular index intervals.
///
/// A branch fires when `(index + offset) mod interval == 0`, and again with the angle
/// negated when `(index + mirror_offset) mod interval == 0`. The branch is a copy of
/// the current cluster one level deeper, rooted at the live element with its scale
/// multiplied by `size_prop`, turned by `branch_ang` degrees and moved `branch_dist`
/// times the combined parent and child scale along its turned direction of travel.
/// Branches below the cluster's minimum scale or past its maximum depth are dropped.
#[derive(Debug)]
pub struct AngleBranch {
    /// Steps between branches; zero disables branching.
    pub interval: u32,
    pub offset: i32,
    pub mirror_offset: Option<i32>,
    pub size_prop: Harness<f32>,
    pub branch_ang: Harness<f32>,
    pub branch_dist: Harness<f32>,
}

impl AngleBranch {
    pub fn new(
        interval: u32,
        offset: i32,
        size_prop: impl Into<Harness<f32>>,
        branch_ang: impl Into<Harness<f32>>,
        branch_dist: impl Into<Harness<f32>>,
    ) -> Self {
        if interval == 0 {
            warn!("Angle branch created with a zero interval; it will never branch.");
        }
        Self {
            interval,
            offset,
            mirror_offset: None,
            size_prop: size_prop.into(),
            branch_ang: branch_ang.into(),
            branch_dist: branch_dist.into(),
        }
    }

    pub fn with_mirror_offset(mut self, mirror_offset: i32) -> Self {
        self.mirror_offset = Some(mirror_offset);
        self
    }

    pub fn reset(&self) {
        self.size_prop.reset();
        self.branch_ang.reset();
        self.branch_dist.reset();
    }

    #[inline]
    fn fires(&self, index: u32, offset: i32) -> bool {
        self.interval != 0
            && (i64::from(index) + i64::from(offset)).rem_euclid(i64::from(self.interval)) == 0
    }

    fn render_branch(
        &self,
        angle: f32,
        size_prop: f32,
        distance: f32,
        ctx: &mut ElementContext<'_>,
    ) {
        let mut branch = ctx.cluster.clone();
        branch.set_root(ctx.element);
        branch.depth += 1;
        branch.root.scale = (branch.root.scale * size_prop).max(0.0);
        if !branch.admits(branch.root.scale, branch.depth) {
            trace!(
                "Dropped branch at depth {} with scale {}.",
                branch.depth,
                branch.root.scale
            );
            return;
        }

        let parent_scale = ctx.element.scale;
        let root = &mut branch.root;
        root.orientation += angle;
        root.derivative = rotate_deg(root.derivative, angle);
        root.index = 0;
        root.position +=
            distance * root.derivative.normalize_or_zero() * (parent_scale + root.scale);

        trace!(
            "Spawning branch at depth {} from index {} with angle {}.",
            branch.depth,
            ctx.element.index,
            angle
        );
        branch.render(&mut *ctx.target, ctx.time);
    }
}

impl GeneratorFunction for AngleBranch {
    fn call(&self, ctx: &mut ElementContext<'_>) -> bool {
        let size_prop = self.size_prop.evaluate(ctx);
        let angle = self.branch_ang.evaluate(ctx);
        let distance = self.branch_dist.evaluate(ctx);
        let index = ctx.element.index;
        if self.fires(index, self.offset) {
            self.render_branch(angle, size_prop, distance, ctx);
        }
        if let Some(mirror) = self.mirror_offset {
            if self.fires(index, mirror) {
                self.render_branch(-angle, size_prop, distance, ctx);
            }
        }
        true
    }
}
