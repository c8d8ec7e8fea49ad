//! The anytime search kernel: bounding, pool filling, the improvement loop,
//! and the termination/emission decision.

use std::time::Duration;

use ocm_core::{ErrorInfo, InterruptFlag, OcmError, RngHandle, RunClock};
use ocm_graph::{Instance, Order};
use rand::seq::SliceRandom;

use crate::bound::lower_bound;
use crate::config::{RunConfig, RunMode};
use crate::construct::{by_average, by_average_random, by_cost_partition, by_median};
use crate::cost::CostOracle;
use crate::improve::{optimize_slice, timed_jump};
use crate::pool::{BestTracker, SolutionPool};

/// Free-layer size beyond which heuristic-mode filling falls back to the
/// cheap average-random constructor.
const HUGE_FREE_LAYER: usize = 30000;
/// Passes the stuck counter forces into the thorough path after a full scan
/// without improvement.
const STUCK_RESET: i32 = 16;
/// Slice-optimization rounds per pass.
const SLICE_ROUNDS: usize = 5;

/// Result of a completed (or interrupted-but-emittable) run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Best order found, over the active free vertices.
    pub order: Order,
    /// Its crossing count.
    pub crossings: u64,
    /// The pairwise relaxation lower bound used by the run.
    pub lower_bound: u64,
    /// Pool candidates tied at the best count when the run stopped.
    pub tied: usize,
    /// Configured pool size the tie count is measured against.
    pub pool_target: usize,
    /// Whether the best count reached the lower bound (proven optimal).
    pub certified: bool,
    /// Wall-clock time consumed.
    pub elapsed: Duration,
}

/// Runs the full anytime pipeline on an instance.
///
/// Phases: select the cost-cache width, compute the (time-bounded) lower
/// bound, fill the candidate pool from the constructors, then cycle
/// improvement passes over the pool until the best count reaches the bound,
/// the whole pool ties at the best count, the budget runs out, or the
/// interrupt flag is raised. Always returns the best snapshot found, with
/// two exceptions: in exact mode a result that is neither certified nor
/// sufficiently agreed upon by the pool is refused with a `not-confident`
/// error, and an interrupt landing before the first candidate exists yields
/// `no-solution`.
pub fn run(
    instance: &Instance,
    config: &RunConfig,
    interrupt: InterruptFlag,
) -> Result<Outcome, OcmError> {
    config.validate()?;
    let clock = RunClock::start(config.time_budget(), interrupt);
    let mut rng = RngHandle::from_seed(config.seed);
    let mut oracle = CostOracle::for_instance(instance, config.cache_budget_bytes);

    let bound = lower_bound(instance, config.bound_budget(), &clock);
    if config.progress {
        eprintln!("lower bound: {bound}");
        eprint!("best so far (pool of {})", config.pool_target);
    }

    let mut pool = SolutionPool::new();
    let mut best = BestTracker::new(config.progress);

    let filled_to_stop = fill_pool(
        instance,
        config,
        &mut oracle,
        &mut pool,
        &mut best,
        &mut rng,
        &clock,
        bound,
    );

    if !filled_to_stop {
        improve_pool(
            instance, config, &mut oracle, &mut pool, &mut best, &mut rng, &clock, bound,
        );
    }

    if config.progress {
        eprintln!();
    }

    finalize(config, &best, bound, &clock)
}

/// Constructs initial candidates: slot 0 by average, slot 1 by median, the
/// rest by cost partition (or by average-random for huge heuristic-mode
/// instances). Returns `true` when a stop condition fired during filling and
/// the run should finalize without improvement passes.
#[allow(clippy::too_many_arguments)]
fn fill_pool(
    instance: &Instance,
    config: &RunConfig,
    oracle: &mut CostOracle,
    pool: &mut SolutionPool,
    best: &mut BestTracker,
    rng: &mut RngHandle,
    clock: &RunClock,
    bound: u64,
) -> bool {
    for slot in 0..config.pool_target {
        let mut order: Order = instance.active().to_vec();
        order.shuffle(rng.inner_mut());

        if slot == 0 {
            by_average(instance, &mut order);
        } else if slot == 1 {
            by_median(instance, &mut order);
        } else if config.mode == RunMode::Heuristic && order.len() > HUGE_FREE_LAYER {
            by_average_random(instance, &mut order, rng);
        } else {
            by_cost_partition(instance, oracle, &mut order, rng);
        }

        let (_, crossings) = pool.insert(instance, order, best);

        if clock.expired() || crossings <= bound {
            return true;
        }
        if clock.elapsed() > clock.budget() / 5 {
            return false;
        }
    }
    false
}

/// The improvement loop: cheap pass first, thorough pass on stagnation (or
/// always, in exact mode), restart-from-top on any improvement so effort
/// concentrates on the currently best candidates.
#[allow(clippy::too_many_arguments)]
fn improve_pool(
    instance: &Instance,
    config: &RunConfig,
    oracle: &mut CostOracle,
    pool: &mut SolutionPool,
    best: &mut BestTracker,
    rng: &mut RngHandle,
    clock: &RunClock,
    bound: u64,
) {
    let exact = config.mode == RunMode::Exact;
    let mut stuck = 0i32;

    'runs: loop {
        for index in pool.indices(rng) {
            if clock.expired() {
                break 'runs;
            }
            let mut improvement = 0u64;

            if stuck <= 0 {
                let before = clock.elapsed();
                for _ in 0..SLICE_ROUNDS {
                    improvement +=
                        optimize_slice(instance, oracle, pool.order_mut(index), rng, false, clock);
                }
                let spent = clock.elapsed().saturating_sub(before);
                if improvement == 0 || exact {
                    improvement += timed_jump(
                        instance,
                        oracle,
                        pool.order_mut(index),
                        rng,
                        spent / 2,
                        clock,
                    );
                }
            }

            if improvement == 0 || exact {
                for _ in 0..SLICE_ROUNDS {
                    let before = clock.elapsed();
                    improvement +=
                        optimize_slice(instance, oracle, pool.order_mut(index), rng, true, clock);
                    let spent = clock.elapsed().saturating_sub(before);
                    improvement += timed_jump(
                        instance,
                        oracle,
                        pool.order_mut(index),
                        rng,
                        spent / 2,
                        clock,
                    );
                }
            }

            if improvement > 0 {
                pool.update(index, improvement, best);
                break;
            }
            stuck = STUCK_RESET;
        }
        stuck -= 1;

        let done = best.snapshot().map_or(false, |snap| {
            snap.crossings <= bound || snap.tied >= config.pool_target
        });
        if done || clock.expired() {
            break;
        }
    }
}

/// Termination decision: reads only the published snapshot, applies the
/// exact-mode confidence gate, and packages the outcome.
fn finalize(
    config: &RunConfig,
    best: &BestTracker,
    bound: u64,
    clock: &RunClock,
) -> Result<Outcome, OcmError> {
    let Some(snapshot) = best.snapshot() else {
        return Err(OcmError::Search(ErrorInfo::new(
            "no-solution",
            "run stopped before any candidate order was constructed",
        )));
    };

    let certified = snapshot.crossings <= bound;
    if config.mode == RunMode::Exact
        && !certified
        && (snapshot.tied as f64) < config.confidence * config.pool_target as f64
    {
        return Err(OcmError::Search(
            ErrorInfo::new(
                "not-confident",
                "best order is neither certified optimal nor agreed upon by the pool",
            )
            .with_context("crossings", snapshot.crossings.to_string())
            .with_context("lower_bound", bound.to_string())
            .with_context("tied", format!("{}/{}", snapshot.tied, config.pool_target)),
        ));
    }

    Ok(Outcome {
        order: snapshot.order.clone(),
        crossings: snapshot.crossings,
        lower_bound: bound,
        tied: snapshot.tied,
        pool_target: config.pool_target,
        certified,
        elapsed: clock.elapsed(),
    })
}
