//! Scenes: named registries of images, elements, functions and clusters.
//!
//! Everything is added by name and references are resolved immediately, so a scene
//! that was assembled without error renders without error. Top-level clusters render
//! once each, in the order they were added, onto one shared target.
//!
//! Harnessed state lives in the registered functions. It accumulates within one render
//! and is reset to the registered initial values before the next, so rendering the same
//! scene at the same time always produces the same image.
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::functions::generator::{
    AdvectElement, AngleBranch, Curly, OrientationGen, PositionList, ScaleGen,
};
use crate::functions::registry::{FunctionRegistry, FunctionTable, Resolve};
use crate::functions::value::{
    Adder, Identity, IndexParam, LogFn, Ratio, ScaleParam, TimeParam, Wiggle,
};
use crate::generation::cluster::Cluster;
use crate::generation::element::Element;
use crate::generation::next_element::NextElement;
use crate::harness::{Harness, ValueFn};
use crate::image::target::RenderTarget;
use crate::image::{AnyImage, ImageRef};

pub mod spec;

use spec::{ClusterSpec, ElementSpec, FunctionSpec, HarnessSpec, SceneConfig};

/// A complete scene description, ready to render.
pub struct Scene {
    pub name: String,
    pub config: SceneConfig,
    images: HashMap<String, ImageRef>,
    elements: HashMap<String, Element>,
    functions: FunctionRegistry,
    next_elements: HashMap<String, Rc<NextElement>>,
    clusters: HashMap<String, Cluster>,
    top_level: Vec<String>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Unnamed")
    }
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: SceneConfig::default(),
            images: HashMap::new(),
            elements: HashMap::new(),
            functions: FunctionRegistry::new(),
            next_elements: HashMap::new(),
            clusters: HashMap::new(),
            top_level: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a source image.
    pub fn add_image(
        &mut self,
        name: impl Into<String>,
        image: impl Into<AnyImage>,
    ) -> Result<ImageRef> {
        let name = name.into();
        if self.images.contains_key(&name) {
            return Err(Error::collision("image", name));
        }
        let image = Arc::new(image.into());
        self.images.insert(name, image.clone());
        Ok(image)
    }

    pub fn image(&self, name: &str) -> Result<ImageRef> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| Error::missing("image", name))
    }

    /// Register an element template, resolving its image and mask names.
    pub fn add_element(&mut self, name: impl Into<String>, spec: ElementSpec) -> Result<()> {
        spec.validate()?;
        let mut element = Element::new(spec.position, spec.scale)
            .with_rotation(spec.rotation)
            .with_orientation(spec.orientation, spec.orientation_lock)
            .with_mask_mode(spec.mask_mode);
        element.derivative_lock = spec.derivative_lock;
        if let Some(image) = &spec.image {
            element = element.with_image(self.image(image)?);
        }
        if let Some(mask) = &spec.mask {
            element = element.with_mask(self.image(mask)?);
        }
        if let Some(tint) = spec.tint {
            element = element.with_tint(tint);
        }
        self.add_element_template(name, element)
    }

    /// Register a ready-made element template.
    pub fn add_element_template(
        &mut self,
        name: impl Into<String>,
        element: Element,
    ) -> Result<()> {
        let name = name.into();
        if self.elements.contains_key(&name) {
            return Err(Error::collision("element", name));
        }
        self.elements.insert(name, element);
        Ok(())
    }

    pub fn element(&self, name: &str) -> Result<&Element> {
        self.elements
            .get(name)
            .ok_or_else(|| Error::missing("element", name))
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Direct access for registering hand-built functions.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Build and register a function from its spec.
    ///
    /// Harnessed fields resolve their function names against functions of the same kind
    /// that are already registered.
    pub fn add_function(&mut self, name: impl Into<String>, spec: FunctionSpec) -> Result<()> {
        let name = name.into();
        let tag = spec.type_name();
        let fns = &self.functions;
        match spec {
            FunctionSpec::IdentityFloat => {
                self.functions.floats.register(name.as_str(), Identity)?;
            }
            FunctionSpec::AdderFloat { r } => {
                let f = Adder { r: harness(&fns.floats, &r)? };
                self.functions.floats.register(name.as_str(), f)?;
            }
            FunctionSpec::LogFn { scale, shift } => {
                let f = LogFn {
                    scale: harness(&fns.floats, &scale)?,
                    shift: harness(&fns.floats, &shift)?,
                };
                self.functions.floats.register(name.as_str(), f)?;
            }
            FunctionSpec::RatioFloat { r } => {
                let f = Ratio { r: harness(&fns.floats, &r)? };
                self.functions.floats.register(name.as_str(), f)?;
            }
            FunctionSpec::Wiggle {
                wavelength,
                amplitude,
                phase,
                wiggliness,
            } => {
                let f = Wiggle {
                    wavelength: harness(&fns.floats, &wavelength)?,
                    amplitude: harness(&fns.floats, &amplitude)?,
                    phase: harness(&fns.floats, &phase)?,
                    wiggliness: harness(&fns.floats, &wiggliness)?,
                };
                self.functions.floats.register(name.as_str(), f)?;
            }
            FunctionSpec::IndexParam { function } => {
                let f = IndexParam::new(fns.floats.get(&function)?);
                self.functions.floats.register(name.as_str(), f)?;
            }
            FunctionSpec::ScaleParam { function } => {
                let f = ScaleParam::new(fns.floats.get(&function)?);
                self.functions.floats.register(name.as_str(), f)?;
            }
            FunctionSpec::TimeParam { function } => {
                let f = TimeParam::new(fns.floats.get(&function)?);
                self.functions.floats.register(name.as_str(), f)?;
            }
            FunctionSpec::IdentityInt => {
                self.functions.ints.register(name.as_str(), Identity)?;
            }
            FunctionSpec::AdderInt { r } => {
                let f = Adder { r: harness(&fns.ints, &r)? };
                self.functions.ints.register(name.as_str(), f)?;
            }
            FunctionSpec::IdentityVec2f => {
                self.functions.vec2s.register(name.as_str(), Identity)?;
            }
            FunctionSpec::AdderVec2f { r } => {
                let f = Adder { r: harness(&fns.vec2s, &r)? };
                self.functions.vec2s.register(name.as_str(), f)?;
            }
            FunctionSpec::RatioVec2f { r } => {
                let f = Ratio { r: harness(&fns.floats, &r)? };
                self.functions.vec2s.register(name.as_str(), f)?;
            }
            FunctionSpec::IdentityVec2i => {
                self.functions.ivec2s.register(name.as_str(), Identity)?;
            }
            FunctionSpec::AdderVec2i { r } => {
                let f = Adder { r: harness(&fns.ivec2s, &r)? };
                self.functions.ivec2s.register(name.as_str(), f)?;
            }
            FunctionSpec::OrientationGenFn { orientation } => {
                let f = OrientationGen {
                    orientation: harness(&fns.floats, &orientation)?,
                };
                self.functions.generators.register(name.as_str(), f)?;
            }
            FunctionSpec::ScaleGenFn { scale } => {
                let f = ScaleGen {
                    scale: harness(&fns.floats, &scale)?,
                };
                self.functions.generators.register(name.as_str(), f)?;
            }
            FunctionSpec::AdvectElement {
                flow,
                step,
                proportional,
            } => {
                let f = AdvectElement {
                    flow: harness(&fns.vec2s, &flow)?,
                    step: harness(&fns.floats, &step)?,
                    proportional,
                };
                self.functions.generators.register(name.as_str(), f)?;
            }
            FunctionSpec::AngleBranch {
                interval,
                offset,
                mirror_offset,
                size_prop,
                branch_ang,
                branch_dist,
            } => {
                let mut f = AngleBranch::new(
                    interval,
                    offset,
                    harness(&fns.floats, &size_prop)?,
                    harness(&fns.floats, &branch_ang)?,
                    harness(&fns.floats, &branch_dist)?,
                );
                f.mirror_offset = mirror_offset;
                self.functions.generators.register(name.as_str(), f)?;
            }
            FunctionSpec::Curly { curliness } => {
                let f = Curly {
                    curliness: harness(&fns.floats, &curliness)?,
                };
                self.functions.generators.register(name.as_str(), f)?;
            }
            FunctionSpec::PositionList { positions } => {
                self.functions
                    .generators
                    .register(name.as_str(), PositionList::new(positions))?;
            }
        }
        debug!("Added {} function '{}'.", tag, name);
        Ok(())
    }

    /// Build and register a cluster from its spec.
    ///
    /// The root element and every generator must already be registered. Top-level
    /// clusters are appended to the render order.
    pub fn add_cluster(&mut self, name: impl Into<String>, spec: ClusterSpec) -> Result<()> {
        let name = name.into();
        spec.validate()?;
        if self.clusters.contains_key(&name) {
            return Err(Error::collision("cluster", name));
        }
        let root = self.element(&spec.element)?.clone();
        let functions = self
            .functions
            .resolve_generators(spec.next_element.iter().map(String::as_str))?;

        let next = Rc::new(NextElement::new(spec.max_n).with_functions(functions));
        let mut cluster = Cluster::new(root, next.clone())
            .with_max_depth(spec.max_depth)
            .with_min_scale(spec.min_scale);
        if let Some(bounds) = spec.bounds {
            cluster = cluster.with_bounds(bounds);
        }

        debug!(
            "Added cluster '{}' rooted at '{}' with {} generators.",
            name,
            spec.element,
            next.len()
        );
        self.next_elements.insert(name.clone(), next);
        self.clusters.insert(name.clone(), cluster);
        if spec.top_level {
            self.top_level.push(name);
        }
        Ok(())
    }

    /// Register a ready-made cluster.
    ///
    /// Harnesses built by hand rather than through [`Scene::add_function`] are not
    /// reset between renders.
    pub fn add_cluster_template(
        &mut self,
        name: impl Into<String>,
        cluster: Cluster,
        top_level: bool,
    ) -> Result<()> {
        let name = name.into();
        if self.clusters.contains_key(&name) {
            return Err(Error::collision("cluster", name));
        }
        self.next_elements.insert(name.clone(), cluster.next.clone());
        self.clusters.insert(name.clone(), cluster);
        if top_level {
            self.top_level.push(name);
        }
        Ok(())
    }

    pub fn cluster(&self, name: &str) -> Result<&Cluster> {
        self.clusters
            .get(name)
            .ok_or_else(|| Error::missing("cluster", name))
    }

    /// The generator built for the cluster `name`.
    pub fn next_element(&self, name: &str) -> Result<Rc<NextElement>> {
        self.next_elements
            .get(name)
            .cloned()
            .ok_or_else(|| Error::missing("next element", name))
    }

    /// Top-level cluster names in render order.
    pub fn top_level(&self) -> &[String] {
        &self.top_level
    }

    /// Render every top-level cluster onto a new output image.
    pub fn render(&self, time: f32) -> Result<AnyImage> {
        self.config.validate()?;
        self.check_tints();
        let mut out = self.config.create_image();
        self.render_into(&mut out, time)?;
        Ok(out)
    }

    /// Render every top-level cluster onto `target`, in declared order.
    ///
    /// Registered functions are reset first; later clusters see the state left by
    /// earlier ones within the same pass.
    pub fn render_into(&self, target: &mut dyn RenderTarget, time: f32) -> Result<()> {
        self.functions.reset();
        for name in &self.top_level {
            let cluster = self.cluster(name)?;
            let rendered = cluster.render(&mut *target, time);
            debug!(
                "Rendered top-level cluster '{}' with {} root-sequence elements at time {}.",
                name, rendered, time
            );
        }
        Ok(())
    }

    /// Top-level clusters whose root tint cannot be applied to the configured output.
    ///
    /// Each is warned about once; the tint is ignored when rendering.
    pub fn check_tints(&self) -> Vec<&str> {
        let kind = self.config.pixel_kind;
        let mut mismatched = Vec::new();
        for name in &self.top_level {
            let Some(tint) = self.clusters.get(name).and_then(|c| c.root.tint.as_ref()) else {
                continue;
            };
            if tint.kind() != kind {
                warn!(
                    "Ignoring {:?} tint of cluster '{}' on a {:?} output.",
                    tint.kind(),
                    name,
                    kind
                );
                mismatched.push(name.as_str());
            }
        }
        mismatched
    }

    /// Render `frames` images at times `i / frames`, handing each to `on_frame`.
    ///
    /// The first error, from rendering or from `on_frame`, stops the animation.
    pub fn animate<F, E>(&self, frames: u32, mut on_frame: F) -> std::result::Result<(), E>
    where
        F: FnMut(u32, AnyImage) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        if frames == 0 {
            return Err(Error::InvalidConfig("frames must be >= 1".into()).into());
        }
        for i in 0..frames {
            let time = i as f32 / frames as f32;
            let image = self.render(time)?;
            on_frame(i, image)?;
        }
        Ok(())
    }
}

fn harness<H, T>(table: &FunctionTable<H>, spec: &HarnessSpec<T>) -> Result<Harness<T>>
where
    H: Resolve<Output = ValueFn<T>>,
    T: Clone,
{
    let functions = spec
        .functions
        .iter()
        .map(|name| table.get(name))
        .collect::<Result<Vec<_>>>()?;
    Ok(Harness::new(spec.value.clone()).with_functions(functions))
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::geometry::Bounds2;
    use crate::image::target::ElementLog;
    use crate::image::{Image, PixelKind};
    use crate::scene::spec::TintSpec;

    fn advect_scene() -> Scene {
        let mut scene = Scene::new("test").with_config(SceneConfig::new(16, 16));
        scene
            .add_image("dot", Image::filled(1, 1, Vec3::ONE))
            .expect("fresh image");
        let seed = ElementSpec::new(Vec2::new(-0.75, 0.0), 0.1).with_image("dot");
        scene.add_element("seed", seed).expect("valid element");
        scene
            .add_function(
                "move",
                FunctionSpec::AdvectElement {
                    flow: Vec2::X.into(),
                    step: 0.25f32.into(),
                    proportional: false,
                },
            )
            .expect("valid function");
        scene
            .add_cluster(
                "trail",
                ClusterSpec::new("seed")
                    .with_next_element("move")
                    .with_max_n(5)
                    .top_level(true),
            )
            .expect("valid cluster");
        scene
    }

    #[test]
    fn renders_top_level_clusters() {
        let scene = advect_scene();
        let mut log = ElementLog::new();
        scene.render_into(&mut log, 0.0).expect("render");
        assert_eq!(log.len(), 5);
        assert_eq!(scene.top_level(), ["trail".to_string()]);
        assert_eq!(scene.next_element("trail").expect("built").max_index, 5);

        let out = scene.render(0.0).expect("render");
        let img = out.as_frgb().expect("frgb output");
        assert!(img.pixels().iter().any(|p| *p == Vec3::ONE));
    }

    #[test]
    fn non_top_level_clusters_are_not_rendered() {
        let mut scene = advect_scene();
        scene
            .add_cluster("hidden", ClusterSpec::new("seed").with_max_n(3))
            .expect("valid cluster");
        let mut log = ElementLog::new();
        scene.render_into(&mut log, 0.0).expect("render");
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn missing_references_fail_fast() {
        let mut scene = advect_scene();
        let err = scene
            .add_element("ghost", ElementSpec::default().with_image("nope"))
            .err()
            .expect("missing image");
        matches!(err, Error::MissingReference { kind: "image", .. })
            .then_some(())
            .expect("expected missing image");

        assert!(scene.add_cluster("c", ClusterSpec::new("unknown")).is_err());
        assert!(scene
            .add_cluster("c", ClusterSpec::new("seed").with_next_element("spin"))
            .is_err());
        assert!(scene
            .add_function(
                "bad",
                FunctionSpec::Curly {
                    curliness: HarnessSpec::new(1.0).with_function("undefined"),
                },
            )
            .is_err());
    }

    #[test]
    fn cluster_names_must_be_unique() {
        let mut scene = advect_scene();
        let err = scene
            .add_cluster("trail", ClusterSpec::new("seed"))
            .err()
            .expect("collision");
        matches!(err, Error::NameCollision { kind: "cluster", .. })
            .then_some(())
            .expect("expected NameCollision");
    }

    #[test]
    fn harness_functions_resolve_by_name() {
        let mut scene = advect_scene();
        scene
            .add_function("shrink", FunctionSpec::RatioFloat { r: 0.5f32.into() })
            .expect("valid function");
        scene
            .add_function(
                "size",
                FunctionSpec::ScaleGenFn {
                    scale: HarnessSpec::new(1.0).with_function("shrink"),
                },
            )
            .expect("valid function");
        scene
            .add_cluster(
                "fade",
                ClusterSpec::new("seed")
                    .with_next_element("size")
                    .with_max_n(4)
                    .with_min_scale(0.0),
            )
            .expect("valid cluster");

        let mut log = ElementLog::new();
        scene.cluster("fade").expect("added").render(&mut log, 0.0);
        let scales: Vec<f32> = log.as_slice().iter().map(|r| r.element.scale).collect();
        assert_eq!(scales, vec![0.1, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn repeated_renders_start_from_initial_state() {
        let mut scene = advect_scene();
        scene
            .add_function("halve", FunctionSpec::RatioFloat { r: 0.5f32.into() })
            .expect("valid function");
        scene
            .add_function(
                "shrink",
                FunctionSpec::ScaleGenFn {
                    scale: HarnessSpec::new(1.0).with_function("halve"),
                },
            )
            .expect("valid function");
        scene
            .add_cluster(
                "dwindle",
                ClusterSpec::new("seed")
                    .with_next_element("shrink")
                    .with_max_n(6)
                    .with_min_scale(0.05)
                    .top_level(true),
            )
            .expect("valid cluster");

        let scales = |log: &ElementLog| -> Vec<f32> {
            log.as_slice().iter().map(|r| r.element.scale).collect()
        };
        let mut first = ElementLog::new();
        let mut second = ElementLog::new();
        scene.render_into(&mut first, 0.0).expect("render");
        scene.render_into(&mut second, 0.0).expect("render");

        assert_eq!(first.len(), second.len());
        assert_eq!(first.positions(), second.positions());
        assert_eq!(scales(&first), scales(&second));
        // The trail renders first, then the shrinking cluster.
        assert_eq!(scales(&second)[5..], [0.1, 0.5, 0.25, 0.125, 0.0625]);
    }

    #[test]
    fn animate_frames_do_not_inherit_state() {
        let mut scene = advect_scene();
        scene
            .add_function("grow", FunctionSpec::AdderFloat { r: 0.1f32.into() })
            .expect("valid function");
        scene
            .add_function(
                "swell",
                FunctionSpec::ScaleGenFn {
                    scale: HarnessSpec::new(0.1).with_function("grow"),
                },
            )
            .expect("valid function");
        scene
            .add_cluster(
                "swelling",
                ClusterSpec::new("seed")
                    .with_next_element("swell")
                    .with_max_n(3)
                    .top_level(true),
            )
            .expect("valid cluster");

        let mut frames = Vec::new();
        scene
            .with_config(SceneConfig::new(16, 16))
            .animate(2, |_, image| {
                frames.push(image);
                Ok::<(), Error>(())
            })
            .expect("animate");
        assert_eq!(frames[0], frames[1]);
    }

    #[test]
    fn later_clusters_paint_over_earlier_ones() {
        let mut scene = Scene::new("layers").with_config(SceneConfig::new(8, 8));
        scene
            .add_image("dot", Image::filled(1, 1, Vec3::ONE))
            .expect("fresh image");
        for (name, tint) in [("blue", Vec3::Z), ("red", Vec3::X)] {
            scene
                .add_element(
                    name,
                    ElementSpec::new(Vec2::ZERO, 0.5)
                        .with_image("dot")
                        .with_tint(TintSpec::Frgb(tint)),
                )
                .expect("valid element");
        }
        // Declared out of alphabetical order to rule out name ordering.
        scene
            .add_cluster("second", ClusterSpec::new("blue").top_level(true))
            .expect("valid cluster");
        scene
            .add_cluster("first", ClusterSpec::new("red").top_level(true))
            .expect("valid cluster");
        assert_eq!(scene.top_level(), ["second".to_string(), "first".to_string()]);

        let out = scene.render(0.0).expect("render");
        let img = out.as_frgb().expect("frgb output");
        assert_eq!(img.get(4, 4), Some(Vec3::X));
        assert!(scene.check_tints().is_empty());
    }

    #[test]
    fn mismatched_tints_are_reported_per_cluster() {
        let mut scene = advect_scene();
        scene
            .add_element(
                "packed",
                ElementSpec::new(Vec2::ZERO, 0.1)
                    .with_image("dot")
                    .with_tint(TintSpec::Ucolor(0xff00_ff00)),
            )
            .expect("valid element");
        scene
            .add_cluster("tinted", ClusterSpec::new("packed").top_level(true))
            .expect("valid cluster");
        assert_eq!(scene.check_tints(), vec!["tinted"]);
        assert!(scene.render(0.0).is_ok());
    }

    #[test]
    fn every_registry_rejects_duplicate_names() {
        let mut scene = advect_scene();
        let err = scene
            .add_image("dot", Image::filled(1, 1, Vec3::ZERO))
            .err()
            .expect("collision");
        matches!(err, Error::NameCollision { kind: "image", .. })
            .then_some(())
            .expect("expected image NameCollision");

        let err = scene
            .add_element_template("seed", Element::default())
            .err()
            .expect("collision");
        matches!(err, Error::NameCollision { kind: "element", .. })
            .then_some(())
            .expect("expected element NameCollision");

        let template = scene.cluster("trail").expect("added").clone();
        let err = scene
            .add_cluster_template("trail", template.clone(), true)
            .err()
            .expect("collision");
        matches!(err, Error::NameCollision { kind: "cluster", .. })
            .then_some(())
            .expect("expected cluster NameCollision");
        assert_eq!(scene.top_level().len(), 1);

        scene
            .add_cluster_template("copy", template, true)
            .expect("fresh name");
        assert_eq!(scene.top_level().len(), 2);
        assert!(scene.next_element("copy").is_ok());
        let mut log = ElementLog::new();
        scene.render_into(&mut log, 0.0).expect("render");
        assert_eq!(log.len(), 10);
    }

    #[test]
    fn cluster_bounds_stop_generation() {
        let mut scene = advect_scene();
        scene
            .add_cluster(
                "boxed",
                ClusterSpec::new("seed")
                    .with_next_element("move")
                    .with_max_n(20)
                    .with_bounds(Bounds2::default()),
            )
            .expect("valid cluster");
        let mut log = ElementLog::new();
        scene.cluster("boxed").expect("added").render(&mut log, 0.0);
        // x = -0.75 + 0.25 * i stays inside the padded box up to x = 0.75.
        assert_eq!(log.len(), 7);
    }

    #[test]
    fn animate_renders_each_frame() {
        let config = SceneConfig::new(4, 4).with_pixel_kind(PixelKind::Ucolor);
        let scene = advect_scene().with_config(config);
        let mut frames = Vec::new();
        scene
            .animate(3, |i, image| {
                frames.push((i, image.kind()));
                Ok::<(), Error>(())
            })
            .expect("animate");
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|(_, kind)| *kind == PixelKind::Ucolor));
        assert!(scene.animate(0, |_, _| Ok::<(), Error>(())).is_err());
    }
}
