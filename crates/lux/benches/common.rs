#![allow(dead_code)]

use std::rc::Rc;
use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::{Vec2, Vec3};
use lux::functions::to_gen_fn;
use lux::prelude::{AdvectElement, AngleBranch, Cluster, Curly, Element, Image, NextElement};

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in rendered elements; never zero so criterion can report a rate.
pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// White unit disk on black, `size` pixels square.
pub fn disk(size: u32) -> Image<Vec3> {
    let mut img = Image::new(size, size);
    for y in 0..size {
        for x in 0..size {
            if img.pixel_center(x, y).length() <= 1.0 {
                img.set(x, y, Vec3::ONE);
            }
        }
    }
    img
}

/// Upward trunk branching to both sides every other step.
pub fn branching_tree(max_n: u32, size_prop: f32, max_depth: u32) -> Cluster {
    let grow = AdvectElement::new(Vec2::Y, 1.0).proportional(true);
    let branch = AngleBranch::new(2, 0, size_prop, 30.0, 1.0).with_mirror_offset(1);
    let next = NextElement::new(max_n)
        .with_function(to_gen_fn(Rc::new(grow)))
        .with_function(to_gen_fn(Rc::new(branch)));
    Cluster::new(Element::new(Vec2::ZERO, 0.05), Rc::new(next))
        .with_max_depth(max_depth)
        .with_min_scale(0.001)
}

/// Single unbranched curling sequence of `max_n` elements.
pub fn spiral(max_n: u32) -> Cluster {
    let next = NextElement::new(max_n)
        .with_function(to_gen_fn(Rc::new(Curly::new(0.5))))
        .with_function(to_gen_fn(Rc::new(AdvectElement::new(Vec2::X, 0.01))));
    Cluster::new(Element::new(Vec2::ZERO, 0.02), Rc::new(next)).with_min_scale(0.0)
}
