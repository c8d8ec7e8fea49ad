use std::collections::BTreeSet;

use ocm_core::RngHandle;
use ocm_graph::count_order;
use ocm_graph::generators::gen_matching;
use ocm_search::pool::{BestTracker, SolutionPool};

#[test]
fn insert_records_the_true_crossing_count() {
    let instance = gen_matching(4).unwrap();
    let mut pool = SolutionPool::new();
    let mut best = BestTracker::new(false);

    let (idx_rev, cr_rev) = pool.insert(&instance, vec![3, 2, 1, 0], &mut best);
    let (idx_id, cr_id) = pool.insert(&instance, vec![0, 1, 2, 3], &mut best);

    assert_eq!(cr_rev, 6);
    assert_eq!(cr_id, 0);
    assert_eq!(pool.crossings_of(idx_rev), 6);
    assert_eq!(pool.crossings_of(idx_id), 0);
    assert_eq!(best.snapshot().unwrap().crossings, 0);
    assert_eq!(best.snapshot().unwrap().order, vec![0, 1, 2, 3]);
}

#[test]
fn update_shifts_count_and_bucket() {
    let instance = gen_matching(4).unwrap();
    let mut pool = SolutionPool::new();
    let mut best = BestTracker::new(false);

    let (index, crossings) = pool.insert(&instance, vec![3, 2, 1, 0], &mut best);
    assert_eq!(crossings, 6);

    // Swap the first two elements by hand and report the matching delta.
    pool.order_mut(index).swap(0, 1);
    let improved = count_order(&instance, pool.order_mut(index));
    pool.update(index, crossings - improved, &mut best);

    assert_eq!(pool.crossings_of(index), improved);
    assert_eq!(best.snapshot().unwrap().crossings, improved);

    let mut rng = RngHandle::from_seed(1);
    assert_eq!(pool.indices(&mut rng), vec![index]);
}

#[test]
fn indices_cover_every_candidate_in_count_order() {
    let instance = gen_matching(5).unwrap();
    let mut pool = SolutionPool::new();
    let mut best = BestTracker::new(false);

    let orders: Vec<Vec<u32>> = vec![
        vec![0, 1, 2, 3, 4],
        vec![4, 3, 2, 1, 0],
        vec![1, 0, 2, 3, 4],
        vec![0, 1, 2, 4, 3],
        vec![2, 1, 0, 4, 3],
    ];
    for order in orders {
        pool.insert(&instance, order, &mut best);
    }

    let mut rng = RngHandle::from_seed(9);
    let indices = pool.indices(&mut rng);

    assert_eq!(indices.len(), pool.len());
    let unique: BTreeSet<usize> = indices.iter().copied().collect();
    assert_eq!(unique.len(), pool.len());

    let counts: Vec<u64> = indices.iter().map(|&i| pool.crossings_of(i)).collect();
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn tied_bucket_size_reaches_the_snapshot() {
    let instance = gen_matching(3).unwrap();
    let mut pool = SolutionPool::new();
    let mut best = BestTracker::new(false);

    pool.insert(&instance, vec![0, 1, 2], &mut best);
    assert_eq!(best.snapshot().unwrap().tied, 1);

    pool.insert(&instance, vec![0, 1, 2], &mut best);
    assert_eq!(best.snapshot().unwrap().tied, 2);

    // A worse candidate must not disturb the published snapshot.
    pool.insert(&instance, vec![2, 1, 0], &mut best);
    assert_eq!(best.snapshot().unwrap().crossings, 0);
    assert_eq!(best.snapshot().unwrap().tied, 2);
}
