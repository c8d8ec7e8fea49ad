use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ocm_core::{InterruptFlag, RngHandle, RunClock};
use ocm_graph::generators::gen_random_bipartite;
use ocm_search::cost::CostOracle;
use ocm_search::improve::{jump_step, optimize_slice};
use rand::seq::SliceRandom;

fn improve_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let instance = gen_random_bipartite(1_000, 1_000, 5_000, &mut rng).unwrap();
    let mut oracle = CostOracle::for_instance(&instance, 1 << 26);
    let mut order: Vec<u32> = instance.active().to_vec();
    order.shuffle(rng.inner_mut());
    let clock = RunClock::start(Duration::from_secs(3600), InterruptFlag::new());

    c.bench_function("jump_step", |b| {
        b.iter(|| black_box(jump_step(&instance, &mut oracle, &mut order, &mut rng)));
    });

    c.bench_function("optimize_slice", |b| {
        b.iter(|| {
            black_box(optimize_slice(
                &instance,
                &mut oracle,
                &mut order,
                &mut rng,
                false,
                &clock,
            ))
        });
    });
}

criterion_group!(benches, improve_bench);
criterion_main!(benches);
