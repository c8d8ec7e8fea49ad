#![deny(missing_docs)]

//! Core types shared across the OCM crossing minimization engine: structured
//! errors, deterministic randomness, and cooperative run control.

pub mod control;
pub mod errors;
pub mod rng;

pub use control::{InterruptFlag, RunClock};
pub use errors::{ErrorInfo, OcmError};
pub use rng::{derive_substream_seed, RngHandle};
