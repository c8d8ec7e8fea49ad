//! Initial order constructors over a free-vertex range.
//!
//! All four operate in place on a mutable slice so the kernel and the slice
//! optimizer can apply them to full orders and sub-windows alike.

use ocm_core::RngHandle;
use ocm_graph::Instance;
use rand::RngCore;

use crate::cost::CostOracle;

fn median(neighbors: &[u32]) -> u32 {
    if neighbors.is_empty() {
        return 0;
    }
    neighbors[neighbors.len() / 2]
}

fn average(neighbors: &[u32]) -> f64 {
    if neighbors.is_empty() {
        return 0.0;
    }
    let sum: f64 = neighbors.iter().map(|&p| p as f64).sum();
    sum / neighbors.len() as f64
}

/// Sorts by (median neighbor position, average neighbor position, vertex id).
pub fn by_median(instance: &Instance, order: &mut [u32]) {
    if order.len() < 2 {
        return;
    }
    let mut keyed: Vec<(u32, f64, u32)> = order
        .iter()
        .map(|&v| {
            let neighbors = instance.fixed_neighbors(v);
            (median(neighbors), average(neighbors), v)
        })
        .collect();
    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.total_cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });
    for (slot, (_, _, v)) in order.iter_mut().zip(keyed) {
        *slot = v;
    }
}

/// Sorts by (average neighbor position, median neighbor position, vertex id).
pub fn by_average(instance: &Instance, order: &mut [u32]) {
    if order.len() < 2 {
        return;
    }
    let mut keyed: Vec<(f64, u32, u32)> = order
        .iter()
        .map(|&v| {
            let neighbors = instance.fixed_neighbors(v);
            (average(neighbors), median(neighbors), v)
        })
        .collect();
    keyed.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });
    for (slot, (_, _, v)) in order.iter_mut().zip(keyed) {
        *slot = v;
    }
}

/// Sorts by (average neighbor position, uniform random tiebreak). Cheaper
/// than the partition constructor; used for very large free layers.
pub fn by_average_random(instance: &Instance, order: &mut [u32], rng: &mut RngHandle) {
    if order.len() < 2 {
        return;
    }
    let mut keyed: Vec<(f64, u64, u32)> = order
        .iter()
        .map(|&v| (average(instance.fixed_neighbors(v)), rng.next_u64(), v))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    for (slot, (_, _, v)) in order.iter_mut().zip(keyed) {
        *slot = v;
    }
}

/// Randomized divide-and-conquer ordering by pairwise cost sign.
///
/// Picks a uniform random pivot, places every element whose cost difference
/// against the pivot is negative before it and every positive one after it
/// (ties keep their current side), then repeats on both sides via an explicit
/// work stack. The pairwise relation is not transitive, so the result is a
/// heuristic, not a sorted order.
pub fn by_cost_partition(
    instance: &Instance,
    oracle: &mut CostOracle,
    order: &mut [u32],
    rng: &mut RngHandle,
) {
    let mut stack: Vec<(usize, usize)> = vec![(0, order.len())];
    let mut before: Vec<u32> = Vec::new();
    let mut after: Vec<u32> = Vec::new();

    while let Some((lo, hi)) = stack.pop() {
        if hi - lo <= 1 {
            continue;
        }
        let pivot_at = lo + rng.index(hi - lo);
        let pivot = order[pivot_at];

        before.clear();
        after.clear();
        for pos in lo..hi {
            if pos == pivot_at {
                continue;
            }
            let element = order[pos];
            let diff = oracle.diff(instance, element, pivot);
            if diff < 0 || (diff == 0 && pos < pivot_at) {
                before.push(element);
            } else {
                after.push(element);
            }
        }

        let mid = lo + before.len();
        order[lo..mid].copy_from_slice(&before);
        order[mid] = pivot;
        order[mid + 1..hi].copy_from_slice(&after);

        stack.push((lo, mid));
        stack.push((mid + 1, hi));
    }
}
