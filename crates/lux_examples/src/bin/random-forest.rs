use glam::{Vec2, Vec3};
use lux::prelude::*;
use lux_examples::{disk_brush, init_tracing, save_png};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const TREES: usize = 24;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(42);
    let mut scene = Scene::new("random-forest").with_config(SceneConfig::new(1024, 1024));
    scene.add_image("leaf", disk_brush(48, 0.4))?;
    scene.add_function(
        "grow",
        FunctionSpec::AdvectElement {
            flow: Vec2::Y.into(),
            step: 1.0f32.into(),
            proportional: true,
        },
    )?;

    for i in 0..TREES {
        let x = rng.random::<f32>() * 1.8 - 0.9;
        let height = rng.random::<f32>();
        let tint = Vec3::new(
            0.1 + rng.random::<f32>() * 0.3,
            0.4 + rng.random::<f32>() * 0.5,
            0.1 + rng.random::<f32>() * 0.2,
        );

        scene.add_element(
            format!("trunk_{i}"),
            ElementSpec::new(Vec2::new(x, -1.0 + 0.3 * height), 0.015 + 0.02 * height)
                .with_image("leaf")
                .with_tint(TintSpec::Frgb(tint)),
        )?;
        scene.add_function(
            format!("fork_{i}"),
            FunctionSpec::AngleBranch {
                interval: 2 + (rng.random::<f32>() * 3.0) as u32,
                offset: 0,
                mirror_offset: Some(1),
                size_prop: (0.55 + rng.random::<f32>() * 0.25).into(),
                branch_ang: (20.0 + rng.random::<f32>() * 30.0).into(),
                branch_dist: 1.0f32.into(),
            },
        )?;
        scene.add_cluster(
            format!("tree_{i}"),
            ClusterSpec::new(format!("trunk_{i}"))
                .with_next_element("grow")
                .with_next_element(format!("fork_{i}"))
                .with_max_n(8 + (height * 8.0) as u32)
                .with_max_depth(4)
                .with_min_scale(0.003)
                .with_bounds(Bounds2::default())
                .top_level(true),
        )?;
    }

    let image = scene.render(0.0)?;
    save_png(&image, "random-forest.png")?;
    Ok(())
}
