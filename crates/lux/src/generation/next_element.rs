//! Next-element generator: advances a live element by one step.
//!
//! [`NextElement::step`] runs in a fixed order: bump the index, check the generator
//! list and index limit, run every generator (stopping at the first that declines),
//! check the minimum scale, recompute the derivative from the applied motion, then test
//! the position against the bounds padded by the element's final scale.
use std::fmt;

use tracing::trace;

use crate::generation::element::ElementContext;
use crate::geometry::Bounds2;
use crate::harness::GenFn;

/// Why a generation sequence ended. None of these are errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The generator list is empty; the cluster holds only its root.
    NoGenerators,
    /// The index reached the configured maximum.
    IndexLimit,
    /// A generator returned `false`.
    Generator,
    /// The element shrank below the cluster's minimum scale.
    BelowMinScale,
    /// The element left the padded bounding region.
    OutOfBounds,
}

/// Outcome of one call to [`NextElement::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Stop(StopReason),
}

impl StepOutcome {
    #[inline]
    pub fn is_continue(self) -> bool {
        matches!(self, StepOutcome::Continue)
    }
}

/// Ordered generator list plus the limits that end a sequence.
pub struct NextElement {
    functions: Vec<GenFn>,
    /// Elements in a sequence have indices below this value.
    pub max_index: u32,
    /// Optional region the element must stay inside, padded by its scale.
    pub bounds: Option<Bounds2>,
}

impl NextElement {
    /// Create an empty generator producing at most `max_index` elements per sequence.
    pub fn new(max_index: u32) -> Self {
        Self {
            functions: Vec::new(),
            max_index,
            bounds: None,
        }
    }

    pub fn with_function(mut self, function: GenFn) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_functions(mut self, functions: impl IntoIterator<Item = GenFn>) -> Self {
        self.functions.extend(functions);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds2) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn add_function(&mut self, function: GenFn) {
        self.functions.push(function);
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Advance the context's element one step; `true` means render it and continue.
    #[inline]
    pub fn advance(&self, ctx: &mut ElementContext<'_>) -> bool {
        self.step(ctx).is_continue()
    }

    /// Advance the context's element one step, reporting why the sequence ended.
    ///
    /// Bounds come from this generator, falling back to the owning cluster's.
    pub fn step(&self, ctx: &mut ElementContext<'_>) -> StepOutcome {
        ctx.element.index += 1;
        if self.functions.is_empty() {
            return StepOutcome::Stop(StopReason::NoGenerators);
        }
        if ctx.element.index >= self.max_index {
            return StepOutcome::Stop(StopReason::IndexLimit);
        }

        let previous = ctx.element.position;
        for function in &self.functions {
            if !function(ctx) {
                return StepOutcome::Stop(StopReason::Generator);
            }
        }

        let element = &mut *ctx.element;
        if element.scale < ctx.cluster.min_scale {
            return StepOutcome::Stop(StopReason::BelowMinScale);
        }
        if !element.derivative_lock {
            element.derivative = element.position - previous;
        }
        if let Some(bounds) = self.bounds.or(ctx.cluster.bounds) {
            if !bounds.contains_padded(element.position, element.scale) {
                return StepOutcome::Stop(StopReason::OutOfBounds);
            }
        }

        trace!(
            "Stepped to index {} at ({}, {}) scale {}.",
            element.index,
            element.position.x,
            element.position.y,
            element.scale
        );
        StepOutcome::Continue
    }
}

impl fmt::Debug for NextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextElement")
            .field("functions", &self.functions.len())
            .field("max_index", &self.max_index)
            .field("bounds", &self.bounds)
            .finish()
    }
}
