//! Anytime optimization engine for one-sided crossing minimization: pair-cost
//! oracle, lower bound, order constructors, randomized local search, solution
//! pool, and the search kernel tying them together under a time budget.

pub mod bound;
pub mod config;
pub mod construct;
pub mod cost;
pub mod improve;
pub mod kernel;
pub mod pool;

pub use bound::lower_bound;
pub use config::{RunConfig, RunMode};
pub use cost::{pair_costs, CostOracle};
pub use kernel::{run, Outcome};
pub use pool::{BestTracker, SolutionPool};
