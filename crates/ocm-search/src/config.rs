//! Run configuration and mode-dependent defaults.

use std::time::Duration;

use ocm_core::{ErrorInfo, OcmError};
use serde::{Deserialize, Serialize};

/// Operating mode of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Emit the best order found when the budget runs out.
    #[default]
    Heuristic,
    /// Refuse to emit unless optimality is certified or strongly supported.
    Exact,
}

/// Parameters governing a run. YAML-configurable; CLI flags override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Operating mode.
    #[serde(default)]
    pub mode: RunMode,
    /// Total wall-clock budget in seconds.
    #[serde(default = "default_time_budget")]
    pub time_budget_secs: f64,
    /// Number of candidate orders the pool aims to hold.
    #[serde(default = "default_pool_target")]
    pub pool_target: usize,
    /// Lower-bound computation budget in seconds; derived from the mode when
    /// absent (3 s heuristic, half the total budget exact).
    #[serde(default)]
    pub bound_budget_secs: Option<f64>,
    /// Memory budget for the pair-cost cache, in bytes.
    #[serde(default = "default_cache_budget")]
    pub cache_budget_bytes: u64,
    /// Fraction of the pool that must tie at the best value for an exact-mode
    /// emission when the lower bound is not reached.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Master seed for all randomized components.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Stream progress to stderr.
    #[serde(default)]
    pub progress: bool,
}

fn default_time_budget() -> f64 {
    295.0
}

fn default_pool_target() -> usize {
    12
}

fn default_cache_budget() -> u64 {
    8_000_000_000
}

fn default_confidence() -> f64 {
    0.75
}

fn default_seed() -> u64 {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Heuristic,
            time_budget_secs: default_time_budget(),
            pool_target: default_pool_target(),
            bound_budget_secs: None,
            cache_budget_bytes: default_cache_budget(),
            confidence: default_confidence(),
            seed: default_seed(),
            progress: false,
        }
    }
}

impl RunConfig {
    /// Exact-mode preset: longer budget, larger pool, half-budget bounding.
    pub fn exact() -> Self {
        Self {
            mode: RunMode::Exact,
            time_budget_secs: 1790.0,
            pool_target: 32,
            ..Self::default()
        }
    }

    /// Preset for the given mode.
    pub fn for_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Heuristic => Self::default(),
            RunMode::Exact => Self::exact(),
        }
    }

    /// Total wall-clock budget.
    pub fn time_budget(&self) -> Duration {
        Duration::from_secs_f64(self.time_budget_secs.max(0.0))
    }

    /// Budget for the lower-bound phase.
    pub fn bound_budget(&self) -> Duration {
        match self.bound_budget_secs {
            Some(secs) => Duration::from_secs_f64(secs.max(0.0)),
            None => match self.mode {
                RunMode::Heuristic => Duration::from_secs(3),
                RunMode::Exact => self.time_budget() / 2,
            },
        }
    }

    /// Validates parameter ranges.
    pub fn validate(&self) -> Result<(), OcmError> {
        if self.pool_target == 0 {
            return Err(OcmError::Config(ErrorInfo::new(
                "empty-pool",
                "pool target must be at least 1",
            )));
        }
        if !self.time_budget_secs.is_finite() || self.time_budget_secs <= 0.0 {
            return Err(OcmError::Config(
                ErrorInfo::new("bad-time-budget", "time budget must be positive and finite")
                    .with_context("time_budget_secs", self.time_budget_secs.to_string()),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(OcmError::Config(
                ErrorInfo::new("bad-confidence", "confidence must lie in [0, 1]")
                    .with_context("confidence", self.confidence.to_string()),
            ));
        }
        Ok(())
    }
}
