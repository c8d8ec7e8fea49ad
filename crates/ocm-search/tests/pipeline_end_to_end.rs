use std::collections::BTreeSet;

use ocm_core::{InterruptFlag, RngHandle};
use ocm_graph::generators::{gen_complete, gen_matching, gen_random_bipartite};
use ocm_graph::Instance;
use ocm_search::{run, RunConfig};

#[test]
fn perfect_matching_finds_the_identity_order() {
    let instance = gen_matching(300).unwrap();
    let config = RunConfig {
        time_budget_secs: 60.0,
        ..RunConfig::default()
    };

    let outcome = run(&instance, &config, InterruptFlag::new()).unwrap();

    assert_eq!(outcome.crossings, 0);
    assert!(outcome.certified);
    let identity: Vec<u32> = (0..300).collect();
    assert_eq!(outcome.order, identity);
}

#[test]
fn complete_bipartite_pair_is_certified_optimal_in_exact_mode() {
    let instance = gen_complete(2, 2).unwrap();
    let config = RunConfig {
        time_budget_secs: 30.0,
        ..RunConfig::exact()
    };

    let outcome = run(&instance, &config, InterruptFlag::new()).unwrap();

    assert_eq!(outcome.crossings, 1);
    assert_eq!(outcome.lower_bound, 1);
    assert!(outcome.certified);
}

#[test]
fn empty_free_layer_terminates_immediately() {
    let instance = Instance::from_edges(4, 0, &[]).unwrap();
    let outcome = run(&instance, &RunConfig::default(), InterruptFlag::new()).unwrap();
    assert_eq!(outcome.crossings, 0);
    assert!(outcome.certified);
    assert!(outcome.order.is_empty());
}

#[test]
fn pre_raised_interrupt_still_emits_the_first_candidate() {
    let mut rng = RngHandle::from_seed(11);
    let instance = gen_random_bipartite(20, 30, 90, &mut rng).unwrap();

    let interrupt = InterruptFlag::new();
    interrupt.raise();
    let outcome = run(&instance, &RunConfig::default(), interrupt).unwrap();

    let expected: BTreeSet<u32> = instance.active().iter().copied().collect();
    let placed: BTreeSet<u32> = outcome.order.iter().copied().collect();
    assert_eq!(placed, expected);
    assert_eq!(outcome.order.len(), expected.len());
}

#[test]
fn exact_mode_refuses_an_uncertain_answer() {
    // Cyclic pairwise preferences: optimum 9, pairwise bound 8, so no run can
    // certify. With effectively no time the pool stays far below the
    // confidence fraction of its huge target.
    let instance = Instance::from_edges(
        6,
        3,
        &[(1, 0), (2, 0), (5, 0), (0, 1), (3, 1), (4, 1), (2, 2), (3, 2)],
    )
    .unwrap();
    let config = RunConfig {
        time_budget_secs: 0.001,
        pool_target: 1000,
        ..RunConfig::exact()
    };

    let err = run(&instance, &config, InterruptFlag::new()).unwrap_err();
    assert_eq!(err.info().code, "not-confident");
}

#[test]
fn heuristic_mode_emits_despite_the_bound_gap() {
    let instance = Instance::from_edges(
        6,
        3,
        &[(1, 0), (2, 0), (5, 0), (0, 1), (3, 1), (4, 1), (2, 2), (3, 2)],
    )
    .unwrap();
    let config = RunConfig {
        time_budget_secs: 1.0,
        pool_target: 4,
        ..RunConfig::default()
    };

    let outcome = run(&instance, &config, InterruptFlag::new()).unwrap();

    assert!(outcome.crossings >= 9, "cannot beat the true optimum");
    assert_eq!(outcome.lower_bound, 8);
    assert!(!outcome.certified);
}
