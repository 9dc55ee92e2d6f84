//! Concrete behaviors and their resolution into canonical callables.
//!
//! Behaviors are plain structs implementing [`ValueFunction`] or [`GeneratorFunction`].
//! Each value kind has a closed tagged union (`Any*Fn`) over shared handles to them;
//! resolving a union member produces the kind's canonical callable from
//! [`crate::harness`], so differently parameterized behaviors can be stored together
//! and chained without knowing their concrete types.
//!
//! | Kind      | Union         | Callable    |
//! |-----------|---------------|-------------|
//! | float     | [`AnyFloatFn`] | [`FloatFn`] |
//! | int       | [`AnyIntFn`]   | [`IntFn`]   |
//! | vec2      | [`AnyVec2Fn`]  | [`Vec2Fn`]  |
//! | ivec2     | [`AnyIVec2Fn`] | [`IVec2Fn`] |
//! | generator | [`AnyGenFn`]   | [`GenFn`]   |
use std::fmt;
use std::rc::Rc;

use glam::{IVec2, Vec2};

use crate::generation::element::ElementContext;
use crate::harness::{gen_fn, value_fn, FloatFn, GenFn, IVec2Fn, IntFn, ValueFn, Vec2Fn};

pub mod generator;
pub mod registry;
pub mod value;

use generator::{AdvectElement, AngleBranch, Curly, OrientationGen, PositionList, ScaleGen};
use value::{Adder, Identity, IndexParam, LogFn, Ratio, ScaleParam, TimeParam, Wiggle};

/// A link in a harness chain for values of type `T`.
pub trait ValueFunction<T> {
    fn call(&self, value: T, ctx: &mut ElementContext<'_>) -> T;
}

/// A generation behavior; returns `false` to end the current sequence.
pub trait GeneratorFunction {
    fn call(&self, ctx: &mut ElementContext<'_>) -> bool;
}

/// Wrap a shared value function as its kind's canonical callable.
pub fn to_value_fn<T, F>(function: Rc<F>) -> ValueFn<T>
where
    T: 'static,
    F: ValueFunction<T> + 'static,
{
    value_fn(move |value, ctx| function.call(value, ctx))
}

/// Wrap a shared generator behavior as a [`GenFn`].
pub fn to_gen_fn<F>(function: Rc<F>) -> GenFn
where
    F: GeneratorFunction + 'static,
{
    gen_fn(move |ctx| function.call(ctx))
}

/// Float value functions.
#[derive(Clone)]
pub enum AnyFloatFn {
    Identity(Rc<Identity>),
    Adder(Rc<Adder<f32>>),
    Log(Rc<LogFn>),
    Ratio(Rc<Ratio>),
    Wiggle(Rc<Wiggle>),
    IndexParam(Rc<IndexParam>),
    ScaleParam(Rc<ScaleParam>),
    TimeParam(Rc<TimeParam>),
}

impl AnyFloatFn {
    pub fn resolve(&self) -> FloatFn {
        match self {
            AnyFloatFn::Identity(f) => to_value_fn::<f32, _>(f.clone()),
            AnyFloatFn::Adder(f) => to_value_fn(f.clone()),
            AnyFloatFn::Log(f) => to_value_fn(f.clone()),
            AnyFloatFn::Ratio(f) => to_value_fn::<f32, _>(f.clone()),
            AnyFloatFn::Wiggle(f) => to_value_fn(f.clone()),
            AnyFloatFn::IndexParam(f) => to_value_fn(f.clone()),
            AnyFloatFn::ScaleParam(f) => to_value_fn(f.clone()),
            AnyFloatFn::TimeParam(f) => to_value_fn(f.clone()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AnyFloatFn::Identity(_) => "identity_float",
            AnyFloatFn::Adder(_) => "adder_float",
            AnyFloatFn::Log(_) => "log_fn",
            AnyFloatFn::Ratio(_) => "ratio_float",
            AnyFloatFn::Wiggle(_) => "wiggle",
            AnyFloatFn::IndexParam(_) => "index_param",
            AnyFloatFn::ScaleParam(_) => "scale_param",
            AnyFloatFn::TimeParam(_) => "time_param",
        }
    }

    /// Restore the function's own harnesses to their initial values.
    ///
    /// Parameter adapters hold no harness; the function they forward to is reset
    /// through its own registry entry.
    pub fn reset(&self) {
        match self {
            AnyFloatFn::Adder(f) => f.reset(),
            AnyFloatFn::Log(f) => f.reset(),
            AnyFloatFn::Ratio(f) => f.reset(),
            AnyFloatFn::Wiggle(f) => f.reset(),
            AnyFloatFn::Identity(_)
            | AnyFloatFn::IndexParam(_)
            | AnyFloatFn::ScaleParam(_)
            | AnyFloatFn::TimeParam(_) => {}
        }
    }
}

/// Integer value functions.
#[derive(Clone)]
pub enum AnyIntFn {
    Identity(Rc<Identity>),
    Adder(Rc<Adder<i32>>),
}

impl AnyIntFn {
    pub fn resolve(&self) -> IntFn {
        match self {
            AnyIntFn::Identity(f) => to_value_fn::<i32, _>(f.clone()),
            AnyIntFn::Adder(f) => to_value_fn(f.clone()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AnyIntFn::Identity(_) => "identity_int",
            AnyIntFn::Adder(_) => "adder_int",
        }
    }

    pub fn reset(&self) {
        if let AnyIntFn::Adder(f) = self {
            f.reset();
        }
    }
}

/// 2D float vector value functions.
#[derive(Clone)]
pub enum AnyVec2Fn {
    Identity(Rc<Identity>),
    Adder(Rc<Adder<Vec2>>),
    Ratio(Rc<Ratio>),
}

impl AnyVec2Fn {
    pub fn resolve(&self) -> Vec2Fn {
        match self {
            AnyVec2Fn::Identity(f) => to_value_fn::<Vec2, _>(f.clone()),
            AnyVec2Fn::Adder(f) => to_value_fn(f.clone()),
            AnyVec2Fn::Ratio(f) => to_value_fn::<Vec2, _>(f.clone()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AnyVec2Fn::Identity(_) => "identity_vec2f",
            AnyVec2Fn::Adder(_) => "adder_vec2f",
            AnyVec2Fn::Ratio(_) => "ratio_vec2f",
        }
    }

    pub fn reset(&self) {
        match self {
            AnyVec2Fn::Identity(_) => {}
            AnyVec2Fn::Adder(f) => f.reset(),
            AnyVec2Fn::Ratio(f) => f.reset(),
        }
    }
}

/// 2D integer vector value functions.
#[derive(Clone)]
pub enum AnyIVec2Fn {
    Identity(Rc<Identity>),
    Adder(Rc<Adder<IVec2>>),
}

impl AnyIVec2Fn {
    pub fn resolve(&self) -> IVec2Fn {
        match self {
            AnyIVec2Fn::Identity(f) => to_value_fn::<IVec2, _>(f.clone()),
            AnyIVec2Fn::Adder(f) => to_value_fn(f.clone()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AnyIVec2Fn::Identity(_) => "identity_vec2i",
            AnyIVec2Fn::Adder(_) => "adder_vec2i",
        }
    }

    pub fn reset(&self) {
        if let AnyIVec2Fn::Adder(f) = self {
            f.reset();
        }
    }
}

/// Generator behaviors.
#[derive(Clone)]
pub enum AnyGenFn {
    Orientation(Rc<OrientationGen>),
    Scale(Rc<ScaleGen>),
    Advect(Rc<AdvectElement>),
    AngleBranch(Rc<AngleBranch>),
    Curly(Rc<Curly>),
    PositionList(Rc<PositionList>),
}

impl AnyGenFn {
    pub fn resolve(&self) -> GenFn {
        match self {
            AnyGenFn::Orientation(f) => to_gen_fn(f.clone()),
            AnyGenFn::Scale(f) => to_gen_fn(f.clone()),
            AnyGenFn::Advect(f) => to_gen_fn(f.clone()),
            AnyGenFn::AngleBranch(f) => to_gen_fn(f.clone()),
            AnyGenFn::Curly(f) => to_gen_fn(f.clone()),
            AnyGenFn::PositionList(f) => to_gen_fn(f.clone()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AnyGenFn::Orientation(_) => "orientation_gen_fn",
            AnyGenFn::Scale(_) => "scale_gen_fn",
            AnyGenFn::Advect(_) => "advect_element",
            AnyGenFn::AngleBranch(_) => "angle_branch",
            AnyGenFn::Curly(_) => "curly",
            AnyGenFn::PositionList(_) => "position_list",
        }
    }

    pub fn reset(&self) {
        match self {
            AnyGenFn::Orientation(f) => f.reset(),
            AnyGenFn::Scale(f) => f.reset(),
            AnyGenFn::Advect(f) => f.reset(),
            AnyGenFn::AngleBranch(f) => f.reset(),
            AnyGenFn::Curly(f) => f.reset(),
            AnyGenFn::PositionList(f) => f.reset(),
        }
    }
}

macro_rules! impl_any_fn {
    ($any:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(
            impl From<$ty> for $any {
                fn from(f: $ty) -> Self {
                    $any::$variant(Rc::new(f))
                }
            }
        )+

        impl fmt::Debug for $any {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($any)).field(&self.type_name()).finish()
            }
        }
    };
}

impl_any_fn!(AnyFloatFn {
    Identity(Identity),
    Adder(Adder<f32>),
    Log(LogFn),
    Ratio(Ratio),
    Wiggle(Wiggle),
    IndexParam(IndexParam),
    ScaleParam(ScaleParam),
    TimeParam(TimeParam),
});
impl_any_fn!(AnyIntFn {
    Identity(Identity),
    Adder(Adder<i32>),
});
impl_any_fn!(AnyVec2Fn {
    Identity(Identity),
    Adder(Adder<Vec2>),
    Ratio(Ratio),
});
impl_any_fn!(AnyIVec2Fn {
    Identity(Identity),
    Adder(Adder<IVec2>),
});
impl_any_fn!(AnyGenFn {
    Orientation(OrientationGen),
    Scale(ScaleGen),
    Advect(AdvectElement),
    AngleBranch(AngleBranch),
    Curly(Curly),
    PositionList(PositionList),
});
