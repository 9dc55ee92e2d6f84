//! Authoring records for scenes.
//!
//! Specs refer to images, functions, elements and generators by name. A
//! [`crate::scene::Scene`] resolves those names when a spec is added.
use glam::{IVec2, UVec2, Vec2, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generation::cluster::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_SCALE};
use crate::geometry::Bounds2;
use crate::image::{AnyImage, AnyPixel, MaskMode, PixelKind, Ucolor};

/// Output image settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Output size in pixels.
    pub size: UVec2,
    /// World region covered by the output image.
    pub bounds: Bounds2,
    pub pixel_kind: PixelKind,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            size: UVec2::new(1024, 1024),
            bounds: Bounds2::default(),
            pixel_kind: PixelKind::Frgb,
        }
    }
}

impl SceneConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds2) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_pixel_kind(mut self, pixel_kind: PixelKind) -> Self {
        self.pixel_kind = pixel_kind;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(Error::InvalidConfig(
                "size must be > 0 in both components".into(),
            ));
        }
        if self.bounds.is_empty() {
            return Err(Error::InvalidConfig("bounds must have a positive area".into()));
        }
        Ok(())
    }

    /// A blank output image matching this configuration.
    pub fn create_image(&self) -> AnyImage {
        AnyImage::new(self.pixel_kind, self.size.x, self.size.y, self.bounds)
    }
}

/// A tint given as one of the pixel kinds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TintSpec {
    Frgb(Vec3),
    /// Packed `0xAARRGGBB`.
    Ucolor(u32),
    #[cfg_attr(feature = "serde", serde(rename = "vec2f"))]
    Field(Vec2),
}

impl From<TintSpec> for AnyPixel {
    fn from(value: TintSpec) -> Self {
        match value {
            TintSpec::Frgb(c) => AnyPixel::Frgb(c),
            TintSpec::Ucolor(u) => AnyPixel::Ucolor(Ucolor(u)),
            TintSpec::Field(v) => AnyPixel::Field(v),
        }
    }
}

/// A named element template. Image and mask refer to registered images.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSpec {
    pub position: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub orientation: f32,
    pub orientation_lock: bool,
    pub mask_mode: MaskMode,
    pub image: Option<String>,
    pub mask: Option<String>,
    pub tint: Option<TintSpec>,
    pub derivative_lock: bool,
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            orientation: 0.0,
            orientation_lock: false,
            mask_mode: MaskMode::Blend,
            image: None,
            mask: None,
            tint: None,
            derivative_lock: false,
        }
    }
}

impl ElementSpec {
    pub fn new(position: Vec2, scale: f32) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
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

    pub fn with_mask_mode(mut self, mask_mode: MaskMode) -> Self {
        self.mask_mode = mask_mode;
        self
    }

    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image = Some(name.into());
        self
    }

    pub fn with_mask(mut self, name: impl Into<String>) -> Self {
        self.mask = Some(name.into());
        self
    }

    pub fn with_tint(mut self, tint: TintSpec) -> Self {
        self.tint = Some(tint);
        self
    }

    pub fn with_derivative_lock(mut self, lock: bool) -> Self {
        self.derivative_lock = lock;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "element scale must be finite and >= 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// A harnessed parameter: a starting value plus names of functions of the same kind.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HarnessSpec<T> {
    pub value: T,
    #[cfg_attr(feature = "serde", serde(default))]
    pub functions: Vec<String>,
}

impl<T> HarnessSpec<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            functions: Vec::new(),
        }
    }

    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.functions.push(name.into());
        self
    }
}

impl<T> From<T> for HarnessSpec<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// A named function, tagged by its type name.
///
/// Harnessed fields may only name functions registered before this one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Clone, Debug, PartialEq)]
pub enum FunctionSpec {
    IdentityFloat,
    AdderFloat {
        r: HarnessSpec<f32>,
    },
    LogFn {
        scale: HarnessSpec<f32>,
        shift: HarnessSpec<f32>,
    },
    RatioFloat {
        r: HarnessSpec<f32>,
    },
    Wiggle {
        wavelength: HarnessSpec<f32>,
        amplitude: HarnessSpec<f32>,
        phase: HarnessSpec<f32>,
        wiggliness: HarnessSpec<f32>,
    },
    IndexParam {
        #[cfg_attr(feature = "serde", serde(rename = "fn"))]
        function: String,
    },
    ScaleParam {
        #[cfg_attr(feature = "serde", serde(rename = "fn"))]
        function: String,
    },
    TimeParam {
        #[cfg_attr(feature = "serde", serde(rename = "fn"))]
        function: String,
    },
    IdentityInt,
    AdderInt {
        r: HarnessSpec<i32>,
    },
    IdentityVec2f,
    AdderVec2f {
        r: HarnessSpec<Vec2>,
    },
    RatioVec2f {
        r: HarnessSpec<f32>,
    },
    IdentityVec2i,
    AdderVec2i {
        r: HarnessSpec<IVec2>,
    },
    OrientationGenFn {
        orientation: HarnessSpec<f32>,
    },
    ScaleGenFn {
        scale: HarnessSpec<f32>,
    },
    AdvectElement {
        flow: HarnessSpec<Vec2>,
        step: HarnessSpec<f32>,
        #[cfg_attr(feature = "serde", serde(default))]
        proportional: bool,
    },
    AngleBranch {
        interval: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        offset: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        mirror_offset: Option<i32>,
        size_prop: HarnessSpec<f32>,
        branch_ang: HarnessSpec<f32>,
        branch_dist: HarnessSpec<f32>,
    },
    Curly {
        curliness: HarnessSpec<f32>,
    },
    PositionList {
        positions: Vec<Vec2>,
    },
}

impl FunctionSpec {
    /// The type tag, identical to the tag of the function it builds.
    pub fn type_name(&self) -> &'static str {
        match self {
            FunctionSpec::IdentityFloat => "identity_float",
            FunctionSpec::AdderFloat { .. } => "adder_float",
            FunctionSpec::LogFn { .. } => "log_fn",
            FunctionSpec::RatioFloat { .. } => "ratio_float",
            FunctionSpec::Wiggle { .. } => "wiggle",
            FunctionSpec::IndexParam { .. } => "index_param",
            FunctionSpec::ScaleParam { .. } => "scale_param",
            FunctionSpec::TimeParam { .. } => "time_param",
            FunctionSpec::IdentityInt => "identity_int",
            FunctionSpec::AdderInt { .. } => "adder_int",
            FunctionSpec::IdentityVec2f => "identity_vec2f",
            FunctionSpec::AdderVec2f { .. } => "adder_vec2f",
            FunctionSpec::RatioVec2f { .. } => "ratio_vec2f",
            FunctionSpec::IdentityVec2i => "identity_vec2i",
            FunctionSpec::AdderVec2i { .. } => "adder_vec2i",
            FunctionSpec::OrientationGenFn { .. } => "orientation_gen_fn",
            FunctionSpec::ScaleGenFn { .. } => "scale_gen_fn",
            FunctionSpec::AdvectElement { .. } => "advect_element",
            FunctionSpec::AngleBranch { .. } => "angle_branch",
            FunctionSpec::Curly { .. } => "curly",
            FunctionSpec::PositionList { .. } => "position_list",
        }
    }
}

/// A named cluster: a root element template plus the generators that advance it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSpec {
    /// Name of the root element template.
    pub element: String,
    /// Generator names, applied in order on every step.
    pub next_element: Vec<String>,
    /// Maximum number of elements per generation sequence.
    pub max_n: u32,
    pub max_depth: u32,
    pub min_scale: f32,
    pub bounds: Option<Bounds2>,
    /// Render this cluster as part of the scene.
    #[cfg_attr(feature = "serde", serde(rename = "tlc"))]
    pub top_level: bool,
}

impl Default for ClusterSpec {
    fn default() -> Self {
        Self {
            element: String::new(),
            next_element: Vec::new(),
            max_n: 1,
            max_depth: DEFAULT_MAX_DEPTH,
            min_scale: DEFAULT_MIN_SCALE,
            bounds: None,
            top_level: false,
        }
    }
}

impl ClusterSpec {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            ..Default::default()
        }
    }

    pub fn with_next_element(mut self, name: impl Into<String>) -> Self {
        self.next_element.push(name.into());
        self
    }

    pub fn with_max_n(mut self, max_n: u32) -> Self {
        self.max_n = max_n;
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

    pub fn top_level(mut self, top_level: bool) -> Self {
        self.top_level = top_level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.element.is_empty() {
            return Err(Error::InvalidConfig("cluster root element name is empty".into()));
        }
        if self.max_n == 0 {
            return Err(Error::InvalidConfig("max_n must be >= 1".into()));
        }
        if !self.min_scale.is_finite() || self.min_scale < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_scale must be finite and >= 0, got {}",
                self.min_scale
            )));
        }
        if let Some(bounds) = self.bounds {
            if bounds.is_empty() {
                return Err(Error::InvalidConfig("bounds must have a positive area".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_config_defaults_and_validation() {
        let config = SceneConfig::default();
        assert_eq!(config.size, UVec2::new(1024, 1024));
        assert!(config.validate().is_ok());
        assert!(SceneConfig::new(0, 10).validate().is_err());
        let flat =
            SceneConfig::new(4, 4).with_bounds(Bounds2::new(Vec2::ZERO, Vec2::new(1.0, 0.0)));
        assert!(flat.validate().is_err());
    }

    #[test]
    fn create_image_uses_kind_and_size() {
        let img = SceneConfig::new(8, 4)
            .with_pixel_kind(PixelKind::Ucolor)
            .create_image();
        assert_eq!(img.kind(), PixelKind::Ucolor);
        assert_eq!(img.size(), (8, 4));
    }

    #[test]
    fn cluster_spec_validation() {
        assert!(ClusterSpec::new("root").validate().is_ok());
        assert!(ClusterSpec::default().validate().is_err());
        assert!(ClusterSpec::new("root").with_max_n(0).validate().is_err());
        assert!(ClusterSpec::new("root").with_min_scale(-1.0).validate().is_err());
        assert!(ClusterSpec::new("root")
            .with_min_scale(f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn element_spec_rejects_negative_scale() {
        assert!(ElementSpec::new(Vec2::ZERO, -0.5).validate().is_err());
        assert!(ElementSpec::new(Vec2::ZERO, 0.0).validate().is_ok());
    }

    #[test]
    fn tint_spec_converts_to_pixel() {
        let px: AnyPixel = TintSpec::Ucolor(0xFF00FF00).into();
        assert_eq!(px, AnyPixel::Ucolor(Ucolor::from_rgb(0, 255, 0)));
        assert_eq!(AnyPixel::from(TintSpec::Field(Vec2::X)).kind(), PixelKind::Field);
    }

    #[test]
    fn function_spec_tags() {
        let spec = FunctionSpec::AdvectElement {
            flow: Vec2::X.into(),
            step: 1.0f32.into(),
            proportional: false,
        };
        assert_eq!(spec.type_name(), "advect_element");
        assert_eq!(FunctionSpec::IdentityVec2i.type_name(), "identity_vec2i");
    }
}
