use glam::{Vec2, Vec3};
use lux::prelude::*;
use lux_examples::{disk_brush, init_tracing, save_png};

const FRAMES: u32 = 4;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Bounds2::new(Vec2::new(-1.0, -0.5), Vec2::new(1.0, 0.5));
    let config = SceneConfig::new(1024, 512).with_bounds(bounds);
    let mut scene = Scene::new("wiggle-trail").with_config(config);
    scene.add_image("dot", disk_brush(32, 0.5))?;
    scene.add_element(
        "head",
        ElementSpec::new(Vec2::new(-0.95, 0.0), 0.02)
            .with_image("dot")
            .with_tint(TintSpec::Frgb(Vec3::new(1.0, 0.6, 0.2))),
    )?;

    // Size pulses along the trail and drifts with time.
    scene.add_function(
        "wave",
        FunctionSpec::Wiggle {
            wavelength: 24.0f32.into(),
            amplitude: 0.012f32.into(),
            phase: 0.0f32.into(),
            wiggliness: 1.0f32.into(),
        },
    )?;
    scene.add_function(
        "by_index",
        FunctionSpec::IndexParam {
            function: "wave".into(),
        },
    )?;
    scene.add_function("base", FunctionSpec::AdderFloat { r: 0.02f32.into() })?;
    scene.add_function(
        "pulse",
        FunctionSpec::ScaleGenFn {
            scale: HarnessSpec::new(0.02)
                .with_function("by_index")
                .with_function("base"),
        },
    )?;
    scene.add_function(
        "crawl",
        FunctionSpec::AdvectElement {
            flow: Vec2::X.into(),
            step: 0.01f32.into(),
            proportional: false,
        },
    )?;

    scene.add_cluster(
        "trail",
        ClusterSpec::new("head")
            .with_next_element("pulse")
            .with_next_element("crawl")
            .with_max_n(190)
            .top_level(true),
    )?;

    scene.animate(FRAMES, |i, image| save_png(&image, format!("wiggle-trail-{i}.png")))?;
    Ok(())
}
