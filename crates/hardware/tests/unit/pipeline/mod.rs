//! Whole-pipeline, cycle-by-cycle integration scenarios.

/// The worked scenarios from `spec.md` §8, run end-to-end through
/// [`rvsim_core::pipeline::engine::Engine`].
pub mod scenarios;
