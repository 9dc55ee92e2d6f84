use glam::Vec2;
use lux::prelude::*;
use lux_examples::{disk_brush, init_tracing, load_png, save_png};

/// Renders a recursively branching tree.
///
/// Pass a PNG path to stamp it as the brush; the output then uses packed colors.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut config = SceneConfig::new(1024, 1024);
    let brush: AnyImage = match std::env::args().nth(1) {
        Some(path) => {
            config = config.with_pixel_kind(PixelKind::Ucolor);
            load_png(path)?.into()
        }
        None => disk_brush(64, 0.3).into(),
    };

    let mut scene = Scene::new("branching-tree").with_config(config);
    scene.add_image("brush", brush)?;
    scene.add_element(
        "trunk",
        ElementSpec::new(Vec2::new(0.0, -0.95), 0.05).with_image("brush"),
    )?;

    // Trunk and branches climb by their own size each step.
    scene.add_function(
        "grow",
        FunctionSpec::AdvectElement {
            flow: Vec2::Y.into(),
            step: 1.2f32.into(),
            proportional: true,
        },
    )?;
    scene.add_function(
        "fork",
        FunctionSpec::AngleBranch {
            interval: 4,
            offset: 0,
            mirror_offset: Some(2),
            size_prop: 0.7f32.into(),
            branch_ang: 35.0f32.into(),
            branch_dist: 1.0f32.into(),
        },
    )?;

    scene.add_cluster(
        "tree",
        ClusterSpec::new("trunk")
            .with_next_element("grow")
            .with_next_element("fork")
            .with_max_n(14)
            .with_max_depth(5)
            .with_min_scale(0.004)
            .with_bounds(Bounds2::default())
            .top_level(true),
    )?;

    let image = scene.render(0.0)?;
    save_png(&image, "branching-tree.png")?;
    Ok(())
}
