use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;
use lux::prelude::*;
use lux_examples::{disk_brush, init_tracing, save_png};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let brush: ImageRef = Arc::new(disk_brush(64, 0.2).into());
    let seed = Element::new(Vec2::new(0.6, 0.0), 0.06)
        .with_image(brush)
        .with_orientation(90.0, true);

    // Heading follows the element's orientation, so turning curls the path inward.
    let heading =
        value_fn(|_flow: Vec2, ctx| Vec2::from_angle(ctx.element.orientation.to_radians()));
    let advect = AdvectElement::new(Harness::new(Vec2::X).with_function(heading), 1.0)
        .proportional(true);
    let shrink = ScaleGen::new(
        Harness::new(0.06).with_function(AnyFloatFn::from(Ratio::new(0.985)).resolve()),
    );
    let curl = Curly::new(0.4);

    let next = NextElement::new(400)
        .with_function(to_gen_fn(Rc::new(curl)))
        .with_function(to_gen_fn(Rc::new(shrink)))
        .with_function(to_gen_fn(Rc::new(advect)));
    let spiral = Cluster::new(seed, Rc::new(next)).with_min_scale(0.002);

    let mut scene = Scene::new("curly-spiral").with_config(SceneConfig::new(1024, 1024));
    scene.add_cluster_template("spiral", spiral, true)?;

    let image = scene.render(0.0)?;
    save_png(&image, "curly-spiral.png")?;
    Ok(())
}
