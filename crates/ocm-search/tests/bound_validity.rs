use std::time::Duration;

use ocm_core::{InterruptFlag, RngHandle, RunClock};
use ocm_graph::generators::{gen_complete, gen_random_bipartite};
use ocm_graph::{count_order, Instance};
use ocm_search::lower_bound;
use proptest::prelude::*;

fn long_clock() -> RunClock {
    RunClock::start(Duration::from_secs(3600), InterruptFlag::new())
}

/// Exhaustive optimum by enumerating every permutation of the active set.
fn exhaustive_optimum(instance: &Instance) -> u64 {
    fn recurse(instance: &Instance, order: &mut Vec<u32>, rest: &mut Vec<u32>, best: &mut u64) {
        if rest.is_empty() {
            *best = (*best).min(count_order(instance, order));
            return;
        }
        for i in 0..rest.len() {
            let v = rest.remove(i);
            order.push(v);
            recurse(instance, order, rest, best);
            order.pop();
            rest.insert(i, v);
        }
    }

    let mut rest = instance.active().to_vec();
    let mut best = u64::MAX;
    recurse(instance, &mut Vec::new(), &mut rest, &mut best);
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn bound_never_exceeds_the_optimum(
        seed in any::<u64>(),
        fixed in 2u32..7,
        free in 2u32..8,
        edges in 1u32..16,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let instance = gen_random_bipartite(fixed, free, edges, &mut rng).unwrap();
        let bound = lower_bound(&instance, Duration::from_secs(60), &long_clock());
        prop_assert!(bound <= exhaustive_optimum(&instance));
    }
}

#[test]
fn complete_bipartite_two_by_two_is_certified_by_the_bound() {
    // K2,2: the single free pair costs one crossing whichever vertex leads,
    // so both orders are optimal at 1 and the bound is tight.
    let instance = gen_complete(2, 2).unwrap();
    let bound = lower_bound(&instance, Duration::from_secs(60), &long_clock());
    assert_eq!(bound, 1);
    assert_eq!(exhaustive_optimum(&instance), 1);
}

#[test]
fn disjoint_matching_has_zero_bound() {
    let instance = Instance::from_edges(2, 2, &[(0, 0), (1, 1)]).unwrap();
    let bound = lower_bound(&instance, Duration::from_secs(60), &long_clock());
    assert_eq!(bound, 0);
    assert_eq!(exhaustive_optimum(&instance), 0);
}

#[test]
fn pairwise_relaxation_can_be_loose() {
    // Cyclic pairwise preferences: every pair can be satisfied in isolation
    // but no order satisfies all three, so the optimum exceeds the bound.
    let instance = Instance::from_edges(
        6,
        3,
        &[(1, 0), (2, 0), (5, 0), (0, 1), (3, 1), (4, 1), (2, 2), (3, 2)],
    )
    .unwrap();
    let bound = lower_bound(&instance, Duration::from_secs(60), &long_clock());
    assert_eq!(bound, 8);
    assert_eq!(exhaustive_optimum(&instance), 9);
}

#[test]
fn expired_clock_returns_a_partial_bound() {
    let mut rng = RngHandle::from_seed(3);
    let instance = gen_random_bipartite(6, 8, 20, &mut rng).unwrap();
    let full = lower_bound(&instance, Duration::from_secs(60), &long_clock());

    let interrupted = InterruptFlag::new();
    interrupted.raise();
    let clock = RunClock::start(Duration::from_secs(3600), interrupted);
    let partial = lower_bound(&instance, Duration::from_secs(60), &clock);

    assert!(partial <= full);
}
