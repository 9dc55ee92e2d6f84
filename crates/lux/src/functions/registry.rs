//! Named tables of function handles and their resolved callables.
//!
//! Tables keep the handle and its resolved callable side by side, so every harness that
//! names a function shares one callable and, through it, one set of harnessed state.
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::functions::{AnyFloatFn, AnyGenFn, AnyIVec2Fn, AnyIntFn, AnyVec2Fn};
use crate::harness::{FloatFn, GenFn, IVec2Fn, IntFn, Vec2Fn};

/// A tagged function handle that resolves to a canonical callable.
pub trait Resolve {
    type Output: Clone;

    /// Kind name used in error messages.
    const KIND: &'static str;

    fn resolve(&self) -> Self::Output;

    fn type_name(&self) -> &'static str;

    /// Restore harnessed state to its initial values.
    fn reset(&self);
}

macro_rules! impl_resolve {
    ($($any:ty => $out:ty, $kind:literal;)+) => {
        $(
            impl Resolve for $any {
                type Output = $out;
                const KIND: &'static str = $kind;

                #[inline]
                fn resolve(&self) -> $out {
                    <$any>::resolve(self)
                }

                #[inline]
                fn type_name(&self) -> &'static str {
                    <$any>::type_name(self)
                }

                #[inline]
                fn reset(&self) {
                    <$any>::reset(self)
                }
            }
        )+
    };
}

impl_resolve! {
    AnyFloatFn => FloatFn, "float function";
    AnyIntFn => IntFn, "int function";
    AnyVec2Fn => Vec2Fn, "vec2 function";
    AnyIVec2Fn => IVec2Fn, "ivec2 function";
    AnyGenFn => GenFn, "generator function";
}

/// Functions of one kind, keyed by unique name.
pub struct FunctionTable<H: Resolve> {
    entries: HashMap<String, (H, H::Output)>,
}

impl<H: Resolve> FunctionTable<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolve `handle` and store it under `name`; names must be unique within the table.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handle: impl Into<H>,
    ) -> Result<H::Output> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::collision(H::KIND, name));
        }
        let handle = handle.into();
        let resolved = handle.resolve();
        self.entries.insert(name, (handle, resolved.clone()));
        Ok(resolved)
    }

    /// The resolved callable registered under `name`.
    pub fn get(&self, name: &str) -> Result<H::Output> {
        self.entries
            .get(name)
            .map(|(_, resolved)| resolved.clone())
            .ok_or_else(|| Error::missing(H::KIND, name))
    }

    /// The handle registered under `name`, if any.
    pub fn handle(&self, name: &str) -> Option<&H> {
        self.entries.get(name).map(|(handle, _)| handle)
    }

    /// Reset the harnessed state of every registered function.
    pub fn reset(&self) {
        for (handle, _) in self.entries.values() {
            handle.reset();
        }
    }

    /// Registered names and type tags, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.entries
            .iter()
            .map(|(name, (handle, _))| (name.as_str(), handle.type_name()))
    }
}

impl<H: Resolve> Default for FunctionTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// One [`FunctionTable`] per value kind plus the generator table.
#[derive(Default)]
pub struct FunctionRegistry {
    pub floats: FunctionTable<AnyFloatFn>,
    pub ints: FunctionTable<AnyIntFn>,
    pub vec2s: FunctionTable<AnyVec2Fn>,
    pub ivec2s: FunctionTable<AnyIVec2Fn>,
    pub generators: FunctionTable<AnyGenFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of registered functions across all kinds.
    pub fn len(&self) -> usize {
        self.floats.len()
            + self.ints.len()
            + self.vec2s.len()
            + self.ivec2s.len()
            + self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reset every table, so the next render starts from the initial values.
    pub fn reset(&self) {
        self.floats.reset();
        self.ints.reset();
        self.vec2s.reset();
        self.ivec2s.reset();
        self.generators.reset();
    }

    /// Resolve several generator names in order.
    pub fn resolve_generators<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<GenFn>> {
        names.into_iter().map(|name| self.generators.get(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::functions::generator::{AdvectElement, Curly, ScaleGen};
    use crate::functions::value::{Adder, Identity, Ratio, Wiggle};
    use crate::generation::test_support::with_context;
    use crate::harness::{value_fn, Harness};

    #[test]
    fn register_and_lookup() {
        let mut table = FunctionTable::<AnyFloatFn>::new();
        table.register("w", Wiggle::default()).expect("fresh name");
        assert!(table.contains("w"));
        assert_eq!(table.len(), 1);
        assert!(table.get("w").is_ok());
        assert_eq!(table.handle("w").map(|h| h.type_name()), Some("wiggle"));
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, vec![("w", "wiggle")]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut table = FunctionTable::<AnyIntFn>::new();
        table.register("id", Identity).expect("fresh name");
        let err = table.register("id", Identity).err().expect("collision");
        matches!(err, Error::NameCollision { kind: "int function", .. })
            .then_some(())
            .expect("expected NameCollision");
    }

    #[test]
    fn unknown_name_is_missing_reference() {
        let registry = FunctionRegistry::new();
        let err = registry.floats.get("nope").err().expect("missing");
        assert_eq!(err.to_string(), "missing float function 'nope'");
    }

    #[test]
    fn registry_reset_restores_every_kind() {
        let mut registry = FunctionRegistry::new();
        let shrink = registry
            .floats
            .register("shrink", Ratio::new(0.5))
            .expect("fresh name");
        let size = Harness::new(1.0f32).with_function(shrink);
        let grow = registry
            .generators
            .register("size", ScaleGen::new(size))
            .expect("fresh name");
        let counter = Harness::new(0i32).with_function(value_fn(|v: i32, _ctx| v + 1));
        let step = registry
            .ints
            .register("step", Adder::<i32>::new(counter))
            .expect("fresh name");

        with_context(|ctx| {
            grow(ctx);
            grow(ctx);
            assert_eq!(ctx.element.scale, 0.25);
            assert_eq!(step(10, ctx), 11);
            assert_eq!(step(10, ctx), 12);
        });
        registry.reset();
        with_context(|ctx| {
            grow(ctx);
            assert_eq!(ctx.element.scale, 0.5);
            assert_eq!(step(10, ctx), 11);
        });
    }

    #[test]
    fn generators_resolve_in_order() {
        let mut registry = FunctionRegistry::new();
        registry
            .generators
            .register("move", AdvectElement::new(Vec2::X, 1.0))
            .expect("fresh name");
        registry
            .generators
            .register("curl", Curly::new(2.0))
            .expect("fresh name");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve_generators(["curl", "move"]).expect("known").len(), 2);
        assert!(registry.resolve_generators(["curl", "spin"]).is_err());
    }
}
