//! Candidate pool bucketed by crossing count, and the published best
//! snapshot.

use std::collections::{BTreeMap, BTreeSet};

use ocm_core::RngHandle;
use ocm_graph::{count_order, Instance, Order};
use rand::seq::SliceRandom;

/// A candidate order paired with its exact crossing count.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The order itself.
    pub order: Order,
    /// True crossing count of `order`; kept in sync by [`SolutionPool`].
    pub crossings: u64,
}

/// Complete, immutable snapshot of the best arrangement seen so far.
#[derive(Debug, Clone)]
pub struct BestSnapshot {
    /// Owned copy of the best order.
    pub order: Order,
    /// Its crossing count.
    pub crossings: u64,
    /// Number of pool candidates currently tied at this count, used as
    /// the confidence signal for exact-mode emission.
    pub tied: usize,
}

/// Holder of the published best snapshot.
///
/// Snapshots are always constructed in full and installed with a single
/// replacement; a reader never observes a partially written snapshot, no
/// matter when termination is requested.
#[derive(Debug, Default)]
pub struct BestTracker {
    snapshot: Option<Box<BestSnapshot>>,
    progress: bool,
}

impl BestTracker {
    /// Creates an empty tracker; `progress` streams updates to stderr.
    pub fn new(progress: bool) -> Self {
        Self {
            snapshot: None,
            progress,
        }
    }

    /// Returns the current snapshot, if any candidate has been seen.
    pub fn snapshot(&self) -> Option<&BestSnapshot> {
        self.snapshot.as_deref()
    }

    /// Returns the best crossing count seen so far.
    pub fn crossings(&self) -> Option<u64> {
        self.snapshot.as_ref().map(|s| s.crossings)
    }

    fn publish(&mut self, order: &[u32], crossings: u64, tied: usize) {
        let next = Box::new(BestSnapshot {
            order: order.to_vec(),
            crossings,
            tied,
        });
        self.snapshot = Some(next);
        if self.progress {
            if tied > 1 {
                eprint!(" -> {crossings}({tied})");
            } else {
                eprint!(" -> {crossings}");
            }
        }
    }
}

/// Bounded set of candidate orders with count-bucketed retrieval.
#[derive(Debug, Default)]
pub struct SolutionPool {
    candidates: Vec<Candidate>,
    buckets: BTreeMap<u64, BTreeSet<usize>>,
}

impl SolutionPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidates held.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Counts the order's crossings, appends it as a candidate, and updates
    /// the best snapshot when it ties or beats the current best. Returns the
    /// new candidate's index and crossing count.
    pub fn insert(
        &mut self,
        instance: &Instance,
        order: Order,
        best: &mut BestTracker,
    ) -> (usize, u64) {
        let crossings = count_order(instance, &order);
        let index = self.candidates.len();
        self.candidates.push(Candidate { order, crossings });
        self.buckets.entry(crossings).or_default().insert(index);
        self.refresh_best(index, crossings, best);
        (index, crossings)
    }

    /// Applies a local-search improvement to a stored candidate: lowers its
    /// count by exactly `improvement`, moves it to the matching bucket, and
    /// re-checks the best snapshot.
    pub fn update(&mut self, index: usize, improvement: u64, best: &mut BestTracker) {
        let old = self.candidates[index].crossings;
        debug_assert!(improvement <= old, "improvement exceeds stored count");
        let stale = self
            .buckets
            .get_mut(&old)
            .map(|bucket| bucket.remove(&index))
            .unwrap_or(false);
        debug_assert!(stale, "candidate missing from its bucket");
        if self.buckets.get(&old).is_some_and(BTreeSet::is_empty) {
            self.buckets.remove(&old);
        }

        let new = old - improvement;
        self.candidates[index].crossings = new;
        self.buckets.entry(new).or_default().insert(index);
        self.refresh_best(index, new, best);
    }

    /// Mutable access to a candidate's order for in-place local search.
    pub fn order_mut(&mut self, index: usize) -> &mut Order {
        &mut self.candidates[index].order
    }

    /// Crossing count currently stored for a candidate.
    pub fn crossings_of(&self, index: usize) -> u64 {
        self.candidates[index].crossings
    }

    /// Every live index, grouped by ascending crossing count, shuffled within
    /// each bucket so iteration order carries no insertion bias.
    pub fn indices(&self, rng: &mut RngHandle) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.candidates.len());
        for bucket in self.buckets.values() {
            let mut group: Vec<usize> = bucket.iter().copied().collect();
            group.shuffle(rng.inner_mut());
            indices.extend(group);
        }
        indices
    }

    fn refresh_best(&self, index: usize, crossings: u64, best: &mut BestTracker) {
        if best.crossings().map_or(true, |current| crossings <= current) {
            let tied = self
                .buckets
                .first_key_value()
                .map(|(_, bucket)| bucket.len())
                .unwrap_or(0);
            best.publish(&self.candidates[index].order, crossings, tied);
        }
    }
}
