mod common;

use std::hint::black_box;

use common::{branching_tree, spiral};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lux::prelude::ElementLog;

fn generation_sequence_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation/sequence");

    for &n in &[16u32, 256, 4096] {
        let cluster = spiral(n);
        group.throughput(common::elements_throughput(n as usize));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let rendered = cluster.render(&mut (), 0.0);
                black_box(rendered);
            });
        });
    }

    group.finish();
}

fn generation_branching_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation/branching");

    for &(max_n, depth) in &[(8u32, 2u32), (8, 3), (12, 3)] {
        let cluster = branching_tree(max_n, 0.6, depth);
        let mut preview = ElementLog::new();
        cluster.render(&mut preview, 0.0);
        group.throughput(common::elements_throughput(preview.len()));

        let id = BenchmarkId::new(format!("max_n_{max_n}"), depth);
        group.bench_with_input(id, &depth, |b, _| {
            let mut log = ElementLog::with_capacity(preview.len());
            b.iter(|| {
                log.clear();
                cluster.render(&mut log, 0.0);
                black_box(log.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = generation_sequence_benches, generation_branching_benches
}
criterion_main!(benches);
