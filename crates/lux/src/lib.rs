#![forbid(unsafe_code)]
//! lux: Generative raster images from recursively expanding element clusters.
//!
//! Modules:
//! - harness: values paired with ordered chains of modifier functions
//! - functions: concrete value/generator behaviors, tagged unions, resolution, registry
//! - generation: elements, step contexts, next-element generators, clusters
//! - image: pixel kinds, rasters, splatting and render targets
//! - scene: named registries, authoring specs and top-level rendering
//!
//! For examples, see the `lux_examples` crate.
pub mod error;
pub mod functions;
pub mod generation;
pub mod geometry;
pub mod harness;
pub mod image;
pub mod scene;

/// Convenient re-exports for common types. Import with `use lux::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::functions::generator::{
        AdvectElement, AngleBranch, Curly, OrientationGen, PositionList, ScaleGen,
    };
    pub use crate::functions::registry::{FunctionRegistry, FunctionTable, Resolve};
    pub use crate::functions::value::{
        Adder, Identity, IndexParam, LogFn, Ratio, ScaleParam, TimeParam, Wiggle,
    };
    pub use crate::functions::{
        to_gen_fn, to_value_fn, AnyFloatFn, AnyGenFn, AnyIVec2Fn, AnyIntFn, AnyVec2Fn,
        GeneratorFunction, ValueFunction,
    };
    pub use crate::generation::cluster::Cluster;
    pub use crate::generation::element::{Element, ElementContext};
    pub use crate::generation::next_element::{NextElement, StepOutcome, StopReason};
    pub use crate::geometry::{rotate_deg, Bounds2};
    pub use crate::harness::{
        gen_fn, value_fn, FloatFn, GenFn, Harness, IVec2Fn, IntFn, ValueFn, Vec2Fn,
    };
    pub use crate::image::target::{ElementLog, FnTarget, RenderTarget, RenderedElement};
    pub use crate::image::{
        AnyImage, AnyPixel, Frgb, Image, ImageRef, MaskMode, Pixel, PixelKind, Ucolor,
    };
    pub use crate::scene::spec::{
        ClusterSpec, ElementSpec, FunctionSpec, HarnessSpec, SceneConfig, TintSpec,
    };
    pub use crate::scene::Scene;
}
