//! Value functions: harness chain links with the signature `T (T, &mut ElementContext)`.
//!
//! Every stored parameter is itself a [`Harness`], evaluated in field order on each call
//! before any of them is used.
use std::f32::consts::TAU;
use std::ops::{Add, Mul};

use crate::functions::ValueFunction;
use crate::generation::element::ElementContext;
use crate::harness::{FloatFn, Harness};

/// Returns the incoming value unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<T> ValueFunction<T> for Identity {
    #[inline]
    fn call(&self, value: T, _ctx: &mut ElementContext<'_>) -> T {
        value
    }
}

/// `value + r`.
#[derive(Debug)]
pub struct Adder<T> {
    pub r: Harness<T>,
}

impl<T: Clone> Adder<T> {
    pub fn new(r: impl Into<Harness<T>>) -> Self {
        Self { r: r.into() }
    }

    pub fn reset(&self) {
        self.r.reset();
    }
}

impl<T> ValueFunction<T> for Adder<T>
where
    T: Clone + Add<Output = T>,
{
    fn call(&self, value: T, ctx: &mut ElementContext<'_>) -> T {
        value + self.r.evaluate(ctx)
    }
}

/// `value * r`, for floats and component-wise for vectors.
#[derive(Debug)]
pub struct Ratio {
    pub r: Harness<f32>,
}

impl Ratio {
    pub fn new(r: impl Into<Harness<f32>>) -> Self {
        Self { r: r.into() }
    }

    pub fn reset(&self) {
        self.r.reset();
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<T> ValueFunction<T> for Ratio
where
    T: Mul<f32, Output = T>,
{
    fn call(&self, value: T, ctx: &mut ElementContext<'_>) -> T {
        value * self.r.evaluate(ctx)
    }
}

/// `scale * ln(shift + value)`; a non-positive logarithm argument yields `0.0`.
#[derive(Debug)]
pub struct LogFn {
    pub scale: Harness<f32>,
    pub shift: Harness<f32>,
}

impl LogFn {
    pub fn new(scale: impl Into<Harness<f32>>, shift: impl Into<Harness<f32>>) -> Self {
        Self {
            scale: scale.into(),
            shift: shift.into(),
        }
    }

    pub fn reset(&self) {
        self.scale.reset();
        self.shift.reset();
    }
}

impl Default for LogFn {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl ValueFunction<f32> for LogFn {
    fn call(&self, value: f32, ctx: &mut ElementContext<'_>) -> f32 {
        let scale = self.scale.evaluate(ctx);
        let shift = self.shift.evaluate(ctx);
        let arg = shift + value;
        if arg > 0.0 {
            scale * arg.ln()
        } else {
            0.0
        }
    }
}

/// Sinusoidal oscillation of the incoming value:
/// `amplitude * sin(TAU * (value / wavelength + phase + wiggliness * time))`.
///
/// A zero wavelength yields `0.0`.
#[derive(Debug)]
pub struct Wiggle {
    pub wavelength: Harness<f32>,
    pub amplitude: Harness<f32>,
    pub phase: Harness<f32>,
    pub wiggliness: Harness<f32>,
}

impl Wiggle {
    pub fn new(
        wavelength: impl Into<Harness<f32>>,
        amplitude: impl Into<Harness<f32>>,
        phase: impl Into<Harness<f32>>,
        wiggliness: impl Into<Harness<f32>>,
    ) -> Self {
        Self {
            wavelength: wavelength.into(),
            amplitude: amplitude.into(),
            phase: phase.into(),
            wiggliness: wiggliness.into(),
        }
    }

    /// Restore every parameter harness to its initial value.
    pub fn reset(&self) {
        self.wavelength.reset();
        self.amplitude.reset();
        self.phase.reset();
        self.wiggliness.reset();
    }
}

impl Default for Wiggle {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }
}

impl ValueFunction<f32> for Wiggle {
    fn call(&self, value: f32, ctx: &mut ElementContext<'_>) -> f32 {
        let wavelength = self.wavelength.evaluate(ctx);
        let amplitude = self.amplitude.evaluate(ctx);
        let phase = self.phase.evaluate(ctx);
        let wiggliness = self.wiggliness.evaluate(ctx);
        if wavelength == 0.0 {
            return 0.0;
        }
        amplitude * (TAU * (value / wavelength + phase + wiggliness * ctx.time)).sin()
    }
}

/// Feeds the element's index, as a float, to `function`; the incoming value is ignored.
pub struct IndexParam {
    pub function: FloatFn,
}

/// Feeds the element's scale to `function`; the incoming value is ignored.
pub struct ScaleParam {
    pub function: FloatFn,
}

/// Feeds the context's time to `function`; the incoming value is ignored.
pub struct TimeParam {
    pub function: FloatFn,
}

impl IndexParam {
    pub fn new(function: FloatFn) -> Self {
        Self { function }
    }
}

impl ScaleParam {
    pub fn new(function: FloatFn) -> Self {
        Self { function }
    }
}

impl TimeParam {
    pub fn new(function: FloatFn) -> Self {
        Self { function }
    }
}

impl ValueFunction<f32> for IndexParam {
    fn call(&self, _value: f32, ctx: &mut ElementContext<'_>) -> f32 {
        let index = ctx.element.index as f32;
        (self.function)(index, ctx)
    }
}

impl ValueFunction<f32> for ScaleParam {
    fn call(&self, _value: f32, ctx: &mut ElementContext<'_>) -> f32 {
        let scale = ctx.element.scale;
        (self.function)(scale, ctx)
    }
}

impl ValueFunction<f32> for TimeParam {
    fn call(&self, _value: f32, ctx: &mut ElementContext<'_>) -> f32 {
        let time = ctx.time;
        (self.function)(time, ctx)
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, Vec2};

    use super::*;
    use crate::generation::test_support::with_context;
    use crate::harness::value_fn;

    #[test]
    fn identity_passes_any_kind_through() {
        with_context(|ctx| {
            assert_eq!(Identity.call(3.5f32, ctx), 3.5);
            assert_eq!(Identity.call(-2i32, ctx), -2);
            assert_eq!(Identity.call(IVec2::new(1, 2), ctx), IVec2::new(1, 2));
        });
    }

    #[test]
    fn adder_accumulates_through_its_harness() {
        let grow: Adder<f32> =
            Adder::new(Harness::new(1.0f32).with_function(value_fn(|v: f32, _ctx| v + 1.0)));
        with_context(|ctx| {
            assert_eq!(grow.call(10.0, ctx), 12.0);
            assert_eq!(grow.call(10.0, ctx), 13.0);
        });
        let shift = Adder::new(Vec2::new(1.0, -1.0));
        assert_eq!(with_context(|ctx| shift.call(Vec2::ZERO, ctx)), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn ratio_scales_floats_and_vectors() {
        let half = Ratio::new(0.5);
        with_context(|ctx| {
            assert_eq!(half.call(4.0f32, ctx), 2.0);
            assert_eq!(half.call(Vec2::new(2.0, -6.0), ctx), Vec2::new(1.0, -3.0));
        });
    }

    #[test]
    fn log_fn_guards_non_positive_argument() {
        let log = LogFn::new(2.0, 1.0);
        with_context(|ctx| {
            assert_eq!(log.call(0.0, ctx), 0.0);
            assert!((log.call(std::f32::consts::E - 1.0, ctx) - 2.0).abs() < 1e-5);
            assert_eq!(log.call(-1.0, ctx), 0.0);
            assert_eq!(log.call(-5.0, ctx), 0.0);
        });
    }

    #[test]
    fn wiggle_with_zero_wavelength_is_zero() {
        let w = Wiggle::new(0.0, 3.0, 0.25, 2.0);
        for value in [-4.0f32, 0.0, 0.3, 17.0] {
            let out = with_context(|ctx| {
                ctx.time = 0.6;
                w.call(value, ctx)
            });
            assert_eq!(out, 0.0);
        }
    }

    #[test]
    fn wiggle_follows_sine() {
        let w = Wiggle::new(4.0, 2.0, 0.0, 0.0);
        with_context(|ctx| {
            assert!((w.call(1.0, ctx) - 2.0).abs() < 1e-5);
            assert!(w.call(2.0, ctx).abs() < 1e-5);
        });
        let moving = Wiggle::new(1.0, 1.0, 0.0, 0.25);
        let out = with_context(|ctx| {
            ctx.time = 1.0;
            moving.call(0.0, ctx)
        });
        assert!((out - 1.0).abs() < 1e-5);
    }

    #[test]
    fn param_adapters_ignore_incoming_value() {
        let double = value_fn(|v: f32, _ctx| v * 2.0);
        let index = IndexParam::new(double.clone());
        let scale = ScaleParam::new(double.clone());
        let time = TimeParam::new(double);
        with_context(|ctx| {
            ctx.element.index = 4;
            ctx.element.scale = 0.25;
            ctx.time = 1.5;
            assert_eq!(index.call(100.0, ctx), 8.0);
            assert_eq!(scale.call(100.0, ctx), 0.5);
            assert_eq!(time.call(100.0, ctx), 3.0);
        });
    }
}
