//! Deterministic instance generators for tests and benches.

use std::collections::BTreeSet;

use ocm_core::{OcmError, RngHandle};

use crate::instance::Instance;

/// Generates a random bipartite instance with up to `edge_target` distinct
/// edges (duplicates drawn by the RNG are skipped).
pub fn gen_random_bipartite(
    fixed_count: u32,
    free_count: u32,
    edge_target: u32,
    rng: &mut RngHandle,
) -> Result<Instance, OcmError> {
    let mut edges: BTreeSet<(u32, u32)> = BTreeSet::new();
    let capacity = fixed_count as u64 * free_count as u64;
    let target = (edge_target as u64).min(capacity) as usize;
    let mut attempts = 0usize;
    while edges.len() < target && attempts < target * 16 {
        let fixed = rng.index(fixed_count as usize) as u32;
        let free = rng.index(free_count as usize) as u32;
        edges.insert((fixed, free));
        attempts += 1;
    }
    let edges: Vec<(u32, u32)> = edges.into_iter().collect();
    Instance::from_edges(fixed_count, free_count, &edges)
}

/// Perfect matching on `k + k` vertices: free vertex `i` joined to fixed `i`.
/// The identity order achieves zero crossings.
pub fn gen_matching(k: u32) -> Result<Instance, OcmError> {
    let edges: Vec<(u32, u32)> = (0..k).map(|i| (i, i)).collect();
    Instance::from_edges(k, k, &edges)
}

/// Complete bipartite instance with every fixed-free edge present.
pub fn gen_complete(fixed_count: u32, free_count: u32) -> Result<Instance, OcmError> {
    let mut edges = Vec::with_capacity(fixed_count as usize * free_count as usize);
    for fixed in 0..fixed_count {
        for free in 0..free_count {
            edges.push((fixed, free));
        }
    }
    Instance::from_edges(fixed_count, free_count, &edges)
}
