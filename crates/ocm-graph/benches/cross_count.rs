use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ocm_core::RngHandle;
use ocm_graph::generators::gen_random_bipartite;
use ocm_graph::{count_coords, count_order, to_coords};
use rand::seq::SliceRandom;

fn cross_count_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let instance = gen_random_bipartite(2_000, 2_000, 10_000, &mut rng).unwrap();
    let mut order: Vec<u32> = instance.active().to_vec();
    order.shuffle(rng.inner_mut());
    let coords = to_coords(&instance, &order);

    c.bench_function("count_order", |b| {
        b.iter(|| black_box(count_order(&instance, &order)));
    });

    c.bench_function("count_coords", |b| {
        b.iter(|| black_box(count_coords(&instance, &coords)));
    });
}

criterion_group!(benches, cross_count_bench);
criterion_main!(benches);
