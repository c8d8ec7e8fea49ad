//! Pairwise relaxation lower bound.

use std::time::{Duration, Instant};

use ocm_core::RunClock;
use ocm_graph::Instance;

use crate::cost::cost_min;

/// Sums the smaller one-sided cost over every unordered pair of active free
/// vertices. Each pair contributes at least its minimum to any arrangement,
/// so the full sum is a valid lower bound on the optimal crossing count;
/// joint achievability is not guaranteed, so the bound may be loose.
///
/// Time-bounded: when `budget` elapses (checked per outer vertex) or the run
/// clock expires, the partial sum over the pairs examined so far is returned,
/// which is still valid, merely looser.
pub fn lower_bound(instance: &Instance, budget: Duration, clock: &RunClock) -> u64 {
    let started = Instant::now();
    let active = instance.active();
    let mut sum = 0u64;

    for (idx, &i) in active.iter().enumerate() {
        for &j in &active[idx + 1..] {
            sum += cost_min(instance, i, j);
        }
        if started.elapsed() > budget || clock.expired() {
            return sum;
        }
    }

    sum
}
