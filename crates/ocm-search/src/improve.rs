//! Randomized local search: single-element relocation and slice refinement.

use std::time::{Duration, Instant};

use ocm_core::{RngHandle, RunClock};
use ocm_graph::{count_order, Instance};

use crate::construct::by_cost_partition;
use crate::cost::CostOracle;

/// Relocation attempts per jump batch.
const JUMP_BATCH: usize = 5000;
/// Ranges at least this long restrict each jump step to a sub-window.
const JUMP_WINDOW_THRESHOLD: usize = 17000;
/// Half-width of the restricted jump window.
const JUMP_WINDOW_RADIUS: usize = 5000;

/// Relocates one uniformly chosen element to its best position in the range.
///
/// Scans outward from the source, accumulating the cumulative cost change of
/// carrying the element past each position: the full rightward run first,
/// then the leftward run with the accumulator reset. The element moves (by
/// adjacent exchanges) to a position drawn uniformly from those achieving the
/// maximum improvement; staying put always achieves at least zero. Returns
/// the improvement.
pub fn jump_step(
    instance: &Instance,
    oracle: &mut CostOracle,
    order: &mut [u32],
    rng: &mut RngHandle,
) -> u64 {
    let n = order.len();
    if n < 2 {
        return 0;
    }
    let moving = rng.index(n);

    let mut best_positions = vec![moving];
    let mut best_change = 0i64;
    let mut change = 0i64;

    for t in 1..n {
        if moving + t == n {
            // Rightward run exhausted; restart the accumulator leftwards.
            change = 0;
        }
        let pos = if moving + t < n { moving + t } else { n - t - 1 };

        change += if pos > moving {
            oracle.diff(instance, order[moving], order[pos])
        } else {
            oracle.diff(instance, order[pos], order[moving])
        };

        if change > best_change {
            best_change = change;
            best_positions.clear();
        }
        if change == best_change {
            best_positions.push(pos);
        }
    }

    let target = best_positions[rng.index(best_positions.len())];
    if moving <= target {
        for pos in moving..target {
            order.swap(pos, pos + 1);
        }
    } else {
        for pos in ((target + 1)..=moving).rev() {
            order.swap(pos, pos - 1);
        }
    }

    best_change as u64
}

/// Repeats capped batches of [`jump_step`] until a whole batch yields no
/// improvement. Very long ranges restrict each step to a randomly centered
/// window to bound per-step cost. Checks the run clock between batches.
pub fn jump(
    instance: &Instance,
    oracle: &mut CostOracle,
    order: &mut [u32],
    rng: &mut RngHandle,
    clock: &RunClock,
) -> u64 {
    let n = order.len();
    if n < 2 {
        return 0;
    }
    let mut total = 0u64;
    loop {
        let mut improvement = 0u64;
        for _ in 0..n.min(JUMP_BATCH) {
            if n < JUMP_WINDOW_THRESHOLD {
                improvement += jump_step(instance, oracle, order, rng);
            } else {
                let center = rng.index(n);
                let lo = center.saturating_sub(JUMP_WINDOW_RADIUS);
                let hi = (center + JUMP_WINDOW_RADIUS).min(n);
                improvement += jump_step(instance, oracle, &mut order[lo..hi], rng);
            }
        }
        if improvement == 0 {
            break;
        }
        total += improvement;
        if clock.expired() {
            break;
        }
    }
    total
}

/// Repeats [`jump_step`] until the wall-clock limit elapses or the run clock
/// expires. Returns the accumulated improvement.
pub fn timed_jump(
    instance: &Instance,
    oracle: &mut CostOracle,
    order: &mut [u32],
    rng: &mut RngHandle,
    limit: Duration,
    clock: &RunClock,
) -> u64 {
    if order.len() < 2 {
        return 0;
    }
    let started = Instant::now();
    let mut total = 0u64;
    while started.elapsed() <= limit && !clock.expired() {
        total += jump_step(instance, oracle, order, rng);
    }
    total
}

/// Re-optimizes a random contiguous window of the order.
///
/// The window radius is drawn from 8..=18 when jump refinement follows and
/// 8..=30 otherwise, then squared, so small windows dominate while large
/// ones stay possible. The window is copied out, rebuilt with the cost partition, and
/// (optionally) refined with [`jump`] to a fixpoint. The rebuilt window is
/// written back only when its crossing count is no worse than the baseline;
/// window-local optimization ignores edges crossing the window boundary, so
/// an unconditional write-back could regress the parent order. Returns the
/// improvement.
pub fn optimize_slice(
    instance: &Instance,
    oracle: &mut CostOracle,
    order: &mut [u32],
    rng: &mut RngHandle,
    jump_refine: bool,
    clock: &RunClock,
) -> u64 {
    let n = order.len();
    if n == 0 {
        return 0;
    }
    let radius_hi: u64 = if jump_refine { 18 } else { 30 };
    let radius = rng.range_inclusive(8, radius_hi) as usize;
    let radius = radius * radius;

    let center = rng.index(n);
    let lo = center.saturating_sub(radius);
    let hi = (center + radius).min(n);
    let mut window: Vec<u32> = order[lo..hi].to_vec();
    if window.len() < 2 {
        return 0;
    }

    let baseline = count_order(instance, &window);
    by_cost_partition(instance, oracle, &mut window, rng);
    let mut current = count_order(instance, &window);

    if jump_refine {
        loop {
            let delta = jump(instance, oracle, &mut window, rng, clock);
            if delta == 0 {
                break;
            }
            current -= delta;
            if clock.expired() {
                break;
            }
        }
    }

    if current <= baseline {
        order[lo..hi].copy_from_slice(&window);
        baseline - current
    } else {
        0
    }
}
